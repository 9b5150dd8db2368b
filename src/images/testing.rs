//! 测试用的本地 HTTP 服务

use std::io::{Cursor, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use image::{ImageFormat, Rgb, RgbImage};

/// 纯绿色的 PNG
pub fn png_bytes(side: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbImage::from_pixel(side, side, Rgb([10, 200, 10]))
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, format!("http://127.0.0.1:{port}/thumb.png"))
}

fn read_request(stream: &mut TcpStream) {
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&chunk[..n]),
        }
    }
}

fn respond(stream: &mut TcpStream, status: &str, body: &[u8]) {
    let head = format!(
        "HTTP/1.1 {status}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}

/// 以 200 应答接下来的 `times` 个请求，返回图片 url
pub fn serve(body: Vec<u8>, times: usize) -> String {
    let (listener, url) = bind();
    thread::spawn(move || {
        for stream in listener.incoming().take(times) {
            let Ok(mut stream) = stream else { continue };
            read_request(&mut stream);
            respond(&mut stream, "200 OK", &body);
        }
    });
    url
}

/// 以给定状态行应答一个请求
pub fn serve_status(status: &'static str) -> String {
    let (listener, url) = bind();
    thread::spawn(move || {
        if let Some(Ok(mut stream)) = listener.incoming().next() {
            read_request(&mut stream);
            respond(&mut stream, status, b"");
        }
    });
    url
}

/// 接受连接但从不应答
pub fn serve_silence() -> String {
    let (listener, url) = bind();
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    url
}
