//! 文本排版工具
//!
//! 按终端显示宽度换行、截断（支持中日韩宽字符）

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const ELLIPSIS: char = '…';

/// 超出宽度时截断并以省略号结尾
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    ellipsize(text, max_width)
}

/// 强制以省略号结尾，总宽度不超过 max_width
fn ellipsize(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out.push(ELLIPSIS);
    out
}

/// 按单词换行，单词过长时按字符断开；段落之间的换行保留
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph, width, &mut lines);
    }
    lines
}

fn wrap_paragraph(text: &str, width: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if !current.is_empty() && current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if word_width > width {
            let mut broken = wrap_chars(word, width);
            if let Some(last) = broken.pop() {
                lines.extend(broken);
                current_width = last.width();
                current = last;
            }
        } else {
            current = word.to_string();
            current_width = word_width;
        }
    }

    // 空段落也占一行
    lines.push(current);
}

fn wrap_chars(word: &str, width: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in word.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > width && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// 最多保留 max_lines 行，被截掉内容时最后一行以省略号结尾
pub fn cap_lines(mut lines: Vec<String>, max_lines: usize, width: usize) -> Vec<String> {
    if lines.len() <= max_lines {
        return lines;
    }
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        let mut text = std::mem::take(last);
        text.push(ELLIPSIS);
        *last = truncate_with_ellipsis(&text, width);
    }
    lines
}
