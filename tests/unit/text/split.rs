use super::*;

#[test]
fn empty_input_yields_no_paragraphs() {
    assert!(split_paragraphs("").is_empty());
}

#[test]
fn splits_on_blank_lines_in_order() {
    assert_eq!(
        split_paragraphs("Line1\n\nLine2\n\nLine3"),
        vec!["Line1", "Line2", "Line3"]
    );
}

#[test]
fn single_newlines_stay_inside_a_paragraph() {
    assert_eq!(split_paragraphs("a\nb\n\nc"), vec!["a\nb", "c"]);
}

#[test]
fn trailing_delimiter_keeps_empty_paragraph() {
    assert_eq!(split_paragraphs("a\n\n"), vec!["a", ""]);
}

#[test]
fn triple_newline_leaves_leading_newline_on_next_paragraph() {
    assert_eq!(split_paragraphs("a\n\n\nb"), vec!["a", "\nb"]);
}

#[test]
fn crlf_is_normalized() {
    assert_eq!(split_paragraphs("a\r\n\r\nb"), vec!["a", "b"]);
}

#[test]
fn whitespace_only_input_is_one_paragraph() {
    assert_eq!(split_paragraphs(" "), vec![" "]);
}
