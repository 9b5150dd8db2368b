use image::imageops::FilterType;

use super::Thumbnail;
use crate::error::ImageError;

/// 解码图片字节，居中裁剪填满 side × side 的正方形
pub fn decode_thumbnail(bytes: &[u8], side: u32) -> Result<Thumbnail, ImageError> {
    let side = side.max(1);
    let decoded = image::load_from_memory(bytes)?;
    let filled = decoded.resize_to_fill(side, side, FilterType::Triangle);
    let pixels = filled.to_rgb8().pixels().map(|p| p.0).collect();

    Ok(Thumbnail::new(side, pixels))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgb, RgbImage};

    use super::*;

    fn png_bytes(image: &RgbImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_wide_image_is_cropped_to_center() {
        // 左右两侧是蓝色，中间是绿色
        let image = RgbImage::from_fn(30, 10, |x, _| {
            if (10..20).contains(&x) {
                Rgb([0, 255, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });

        let thumbnail = decode_thumbnail(&png_bytes(&image), 4).unwrap();

        assert_eq!(thumbnail.side(), 4);
        let [r, g, b] = thumbnail.pixel(1, 1).unwrap();
        assert!(g > 200 && r < 30 && b < 30, "center crop lost: {r},{g},{b}");
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = decode_thumbnail(b"\x89PNG broken", 8).unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)));
    }
}
