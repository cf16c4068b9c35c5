/// Blank-line paragraph delimiter.
pub const PARAGRAPH_DELIMITER: &str = "\n\n";

/// Split a text block into ordered paragraphs on blank lines.
///
/// Empty input yields no paragraphs. Everything else keeps plain split semantics, so empty
/// paragraphs between or after delimiters stay in place and keep their index. `\r\n` is
/// normalized to `\n` first.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let normalized;
    let text = if text.contains('\r') {
        normalized = text.replace("\r\n", "\n");
        normalized.as_str()
    } else {
        text
    };

    text.split(PARAGRAPH_DELIMITER)
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/text/split.rs"]
mod tests;
