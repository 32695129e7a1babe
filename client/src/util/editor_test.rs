use super::*;

#[test]
fn bold_wraps_ascii_selection() {
    let wrapped = wrap_selection("make this bold", 5, 9, Format::Bold);
    assert_eq!(wrapped.text, "make **this** bold");
    assert_eq!((wrapped.selection_start, wrapped.selection_end), (7, 11));
}

#[test]
fn empty_selection_inserts_markers_at_cursor() {
    let wrapped = wrap_selection("ab", 1, 1, Format::Link);
    assert_eq!(wrapped.text, "a[](url)b");
    assert_eq!(wrapped.selection_start, 2);
    assert_eq!(wrapped.selection_end, 2);
}

#[test]
fn prefix_formats_have_no_closing_marker() {
    assert_eq!(wrap_selection("Topic", 0, 5, Format::Heading).text, "\n### Topic");
    assert_eq!(wrap_selection("item", 0, 4, Format::List).text, "\n- item");
    assert_eq!(wrap_selection("x", 0, 1, Format::Image).text, "![alt]x(url)");
}

#[test]
fn offsets_are_utf16_units() {
    // "සෛල" is three BMP chars (one UTF-16 unit each, three bytes each).
    let text = "සෛල cell";
    let wrapped = wrap_selection(text, 0, 3, Format::Italic);
    assert_eq!(wrapped.text, "*සෛල* cell");

    // An astral char counts as two UTF-16 units.
    let wrapped = wrap_selection("😀ab", 2, 3, Format::Bold);
    assert_eq!(wrapped.text, "😀**a**b");
    assert_eq!(wrapped.selection_start, 4);
}

#[test]
fn reversed_and_out_of_range_selections_are_normalised() {
    assert_eq!(wrap_selection("abc", 3, 1, Format::Bold).text, "a**bc**");
    assert_eq!(wrap_selection("abc", 1, 99, Format::Italic).text, "a*bc*");
}

#[test]
fn utf16_helpers() {
    assert_eq!(utf16_len("a😀"), 3);
    assert_eq!(utf16_to_byte("a😀b", 3), 5);
    assert_eq!(utf16_to_byte("ab", 10), 2);
}
