//! Word scanning
//!
//! A word is a maximal run of ASCII letters, digits and underscores.
//! Everything else, including every non-ASCII character, separates words.

/// Check if a byte is a word character
pub fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// A word found in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordToken<'a> {
    /// Byte offset of the first character
    pub start: usize,
    /// The word itself (always ASCII)
    pub text: &'a str,
}

impl<'a> WordToken<'a> {
    /// Byte offset one past the last character
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Length in characters (equal to bytes, words are ASCII)
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Single forward pass over the text yielding each word once
#[derive(Debug, Clone)]
pub struct WordScanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> WordScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for WordScanner<'a> {
    type Item = WordToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();

        // Skip separators. Multi-byte UTF-8 sequences are all >= 0x80, so
        // word boundaries always land on char boundaries.
        while self.pos < bytes.len() && !is_word_byte(bytes[self.pos]) {
            self.pos += 1;
        }
        if self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos;
        while self.pos < bytes.len() && is_word_byte(bytes[self.pos]) {
            self.pos += 1;
        }

        Some(WordToken {
            start,
            text: &self.text[start..self.pos],
        })
    }
}

/// Scan all words in the text
pub fn scan_words(text: &str) -> WordScanner<'_> {
    WordScanner::new(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<(usize, &str)> {
        scan_words(text).map(|w| (w.start, w.text)).collect()
    }

    #[test]
    fn test_simple_words() {
        assert_eq!(
            words("let x = foo_bar(42);"),
            vec![(0, "let"), (4, "x"), (8, "foo_bar"), (16, "42")]
        );
    }

    #[test]
    fn test_empty_and_separators_only() {
        assert!(words("").is_empty());
        assert!(words("  ;;\n\t(){}").is_empty());
    }

    #[test]
    fn test_word_at_text_boundaries() {
        assert_eq!(words("alpha beta"), vec![(0, "alpha"), (6, "beta")]);
    }

    #[test]
    fn test_non_ascii_splits_words() {
        // 'é' is two bytes and not a word character
        assert_eq!(words("café au"), vec![(0, "caf"), (6, "au")]);
    }

    #[test]
    fn test_token_end() {
        let token = scan_words("  reading").next().unwrap();
        assert_eq!(token.start, 2);
        assert_eq!(token.end(), 9);
        assert_eq!(token.len(), 7);
    }

    #[test]
    fn test_scanner_is_exhausted() {
        let mut scanner = scan_words("one two");
        assert!(scanner.next().is_some());
        assert!(scanner.next().is_some());
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_is_word_byte() {
        assert!(is_word_byte(b'a'));
        assert!(is_word_byte(b'Z'));
        assert!(is_word_byte(b'7'));
        assert!(is_word_byte(b'_'));
        assert!(!is_word_byte(b'-'));
        assert!(!is_word_byte(b' '));
        assert!(!is_word_byte(0xC3));
    }
}
