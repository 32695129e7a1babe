//! Selection wrapping for the post editor's formatting toolbar.
//!
//! Browser textareas report `selectionStart` / `selectionEnd` in UTF-16 code
//! units, while Rust strings index by byte. Offsets are converted before
//! slicing so Sinhala and Tamil text is never split inside a character.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

/// Toolbar action and the markers it inserts around the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Bold,
    Italic,
    Heading,
    List,
    Link,
    Image,
}

impl Format {
    pub const ALL: [Self; 6] = [Self::Bold, Self::Italic, Self::Heading, Self::List, Self::Link, Self::Image];

    #[must_use]
    pub fn markers(self) -> (&'static str, &'static str) {
        match self {
            Self::Bold => ("**", "**"),
            Self::Italic => ("*", "*"),
            Self::Heading => ("\n### ", ""),
            Self::List => ("\n- ", ""),
            Self::Link => ("[", "](url)"),
            Self::Image => ("![alt]", "(url)"),
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Heading => "Heading",
            Self::List => "List",
            Self::Link => "Link",
            Self::Image => "Image",
        }
    }

    /// Short glyph shown on the toolbar button.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Bold => "B",
            Self::Italic => "I",
            Self::Heading => "H",
            Self::List => "•",
            Self::Link => "🔗",
            Self::Image => "🖼",
        }
    }
}

/// Byte offset of the UTF-16 offset `units`, clamped to the string.
#[must_use]
pub fn utf16_to_byte(text: &str, units: u32) -> usize {
    let mut seen = 0u32;
    for (byte, ch) in text.char_indices() {
        if seen >= units {
            return byte;
        }
        seen += u32::try_from(ch.len_utf16()).unwrap_or(2);
    }
    text.len()
}

#[must_use]
pub fn utf16_len(text: &str) -> u32 {
    text.chars().map(|c| u32::try_from(c.len_utf16()).unwrap_or(2)).sum()
}

/// Result of wrapping a selection: the new text and the new selection,
/// in UTF-16 units, covering the originally selected text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wrapped {
    pub text: String,
    pub selection_start: u32,
    pub selection_end: u32,
}

/// Insert `format`'s markers around the UTF-16 selection `[start, end)`.
///
/// Reversed selections are normalised; out-of-range offsets clamp to the
/// end of the text.
#[must_use]
pub fn wrap_selection(text: &str, start: u32, end: u32, format: Format) -> Wrapped {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let start_byte = utf16_to_byte(text, start);
    let end_byte = utf16_to_byte(text, end);
    let (before, rest) = text.split_at(start_byte);
    let (selected, after) = rest.split_at(end_byte - start_byte);
    let (open, close) = format.markers();

    let mut out = String::with_capacity(text.len() + open.len() + close.len());
    out.push_str(before);
    out.push_str(open);
    out.push_str(selected);
    out.push_str(close);
    out.push_str(after);

    let selection_start = utf16_len(before) + utf16_len(open);
    Wrapped { text: out, selection_start, selection_end: selection_start + utf16_len(selected) }
}
