//
// document.rs
//
// In-memory document snapshot backed by a rope
//

use ropey::Rope;

use crate::host::DocumentAccess;

/// One open document: immutable text snapshot plus the host language tag.
pub struct Document {
    contents: Rope,
    language: String,
}

impl Document {
    pub fn new(text: &str, language_tag: &str) -> Self {
        Self {
            contents: Rope::from_str(text),
            language: language_tag.to_string(),
        }
    }

    pub fn text(&self) -> String {
        self.contents.to_string()
    }
}

impl DocumentAccess for Document {
    fn line_count(&self) -> u32 {
        self.contents.len_lines() as u32
    }

    fn line_text(&self, line: u32) -> String {
        if (line as usize) >= self.contents.len_lines() {
            return String::new();
        }
        let mut text = self.contents.line(line as usize).to_string();
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        text
    }

    fn language_tag(&self) -> &str {
        &self.language
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_text_strips_newline() {
        let doc = Document::new("first\nsecond\r\nthird", "python");
        assert_eq!(doc.line_text(0), "first");
        assert_eq!(doc.line_text(1), "second");
        assert_eq!(doc.line_text(2), "third");
    }

    #[test]
    fn test_line_text_out_of_range() {
        let doc = Document::new("only", "rust");
        assert_eq!(doc.line_text(5), "");
    }

    #[test]
    fn test_line_count_trailing_newline() {
        // A trailing newline opens a final empty line, matching editor
        // semantics.
        let doc = Document::new("a\nb\n", "go");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_text(2), "");
    }

    #[test]
    fn test_language_tag() {
        let doc = Document::new("", "typescriptreact");
        assert_eq!(doc.language_tag(), "typescriptreact");
    }
}
