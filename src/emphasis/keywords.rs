//! Keyword filtering
//!
//! Words that are too short, or that appear in the excluded keyword set,
//! are never emphasized. Matching is exact and case-sensitive: `const` is
//! excluded, `constant` and `Const` are not.

use std::collections::HashSet;

/// Words shorter than this are never emphasized
pub const MIN_WORD_LEN: usize = 3;

/// Built-in excluded keywords: JavaScript/TypeScript syntax and common
/// DOM and standard library names
pub const DEFAULT_EXCLUDED_KEYWORDS: &[&str] = &[
    "const", "function", "async", "var", "console", "log",
    "let", "class", "import", "export", "new", "return", "if", "else",
    "switch", "case", "break", "continue", "for", "while", "do", "try",
    "catch", "finally", "throw", "typeof", "instanceof", "delete", "void",
    "this", "super", "extends", "await", "yield", "static", "get", "set",
    "require", "module", "exports", "process", "Buffer", "setTimeout",
    "setInterval", "clearTimeout", "clearInterval", "Math", "Date", "RegExp",
    "JSON", "eval", "parseInt", "parseFloat", "isNaN", "isFinite",
    "document", "window", "getElementById", "querySelector", "querySelectorAll",
    "addEventListener", "removeEventListener", "appendChild", "removeChild",
    "createElement", "innerHTML", "innerText", "textContent", "className", "id", "style",
    "forEach", "map", "filter", "reduce", "find", "findIndex", "every", "some",
    "slice", "splice", "concat", "push", "pop", "shift", "unshift", "join",
    "sort", "reverse", "includes", "indexOf", "lastIndexOf", "charAt",
    "charCodeAt", "endsWith", "startsWith", "substring", "toLowerCase", "toUpperCase",
    "trim", "trimStart", "trimEnd", "replace", "split",
    "backgroundColor", "href", "src", "alt", "title", "width", "height",
    "classList", "dataset", "offsetHeight", "offsetWidth", "clientHeight", "clientWidth",
    "in", "of", "from", "as", "default", "interface", "type", "enum",
    "namespace", "implements", "public", "private", "protected",
    "readonly", "declare",
];

/// Exact-match keyword denylist plus the length floor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordFilter {
    keywords: HashSet<String>,
}

impl KeywordFilter {
    /// Create a filter from a list of keywords
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a word is excluded from emphasis
    pub fn is_excluded(&self, word: &str) -> bool {
        word.len() < MIN_WORD_LEN || self.keywords.contains(word)
    }

    /// Check if a word is in the keyword set (ignores the length floor)
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl Default for KeywordFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_KEYWORDS.iter().copied())
    }
}
