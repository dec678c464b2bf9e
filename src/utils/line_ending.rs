#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    Crlf,
}

pub fn detect_line_ending(content: &str) -> LineEnding {
    let crlf_count = content.matches("\r\n").count();
    let lf_count = content.matches('\n').count() - crlf_count;

    if crlf_count > lf_count {
        LineEnding::Crlf
    } else {
        LineEnding::Lf
    }
}

pub fn normalize_to_lf(content: &str) -> String {
    content.replace("\r\n", "\n")
}

/// Convert LF-only text back to the line ending style of `original`
pub fn restore_line_ending(original: &str, modified: &str) -> String {
    match detect_line_ending(original) {
        LineEnding::Lf => modified.to_string(),
        LineEnding::Crlf => modified.replace("\r\n", "\n").replace('\n', "\r\n"),
    }
}
