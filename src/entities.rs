//!
//! HTML entity handling for fragments taken from and put back into markup.

use std::borrow::Cow;

/// Decode every named and numeric entity
pub fn decode(text: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(text)
}

/// Encode `<` and `>` only; the fragment is re-embedded into the markup verbatim
pub fn encode_angle_brackets(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
