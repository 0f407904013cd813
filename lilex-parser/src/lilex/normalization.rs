//! Name and text normalization
//!
//!     Entry names are written by hand, with inconsistent capitalization and spacing. Every
//!     lookup in the lexicon goes through [normalize_name] so that `{Glider}`, `{glider}` and
//!     `{ glider }` all land on the same key, while the text as written is kept as the display
//!     form.

/// Collapse every whitespace run to a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lookup key for an entry name: whitespace collapsed and case-folded.
pub fn normalize_name(name: &str) -> String {
    collapse_whitespace(name).to_lowercase()
}

/// Accumulates words into a single line, emitting at most one space between them.
///
/// Leading and trailing whitespace never reach the output, so the result needs no trimming.
#[derive(Debug, Default)]
pub struct TextBuilder {
    out: String,
    pending_space: bool,
}

impl TextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text verbatim, preceded by a single space if whitespace was seen since the
    /// last word.
    pub fn word(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.pending_space && !self.out.is_empty() {
            self.out.push(' ');
        }
        self.pending_space = false;
        self.out.push_str(text);
    }

    /// Record a whitespace run.
    pub fn space(&mut self) {
        self.pending_space = true;
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Gosper \t glider\n gun "), "Gosper glider gun");
        assert_eq!(collapse_whitespace(" \t\n"), "");
    }

    #[test]
    fn test_normalize_name_case_folds() {
        assert_eq!(normalize_name("GLIDER"), "glider");
        assert_eq!(normalize_name(" Still   Life "), "still life");
    }

    #[test]
    fn test_text_builder_single_spaces() {
        let mut builder = TextBuilder::new();
        builder.space();
        builder.word("one");
        builder.space();
        builder.space();
        builder.word("two");
        builder.word(";");
        builder.space();
        assert_eq!(builder.finish(), "one two;");
    }
}
