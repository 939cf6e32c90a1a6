//! Bionic reading emphasis engine
//!
//! Given a document's text and a [`Configuration`], the engine returns the
//! characters to emphasize as single-character byte ranges in scan order.
//!
//! Pipeline:
//! 1. find quoted literals and comments ([`regions`])
//! 2. scan words left to right ([`words`])
//! 3. drop words that start inside a region, are shorter than three
//!    characters, or are excluded keywords ([`keywords`])
//! 4. emphasize the leading fraction of each remaining word plus any
//!    capital letters ([`boundary`])
//!
//! The engine keeps no state between calls.

pub mod boundary;
pub mod keywords;
pub mod regions;
pub mod words;

use once_cell::sync::Lazy;
use tracing::debug;

pub use boundary::{clamp_fraction, emphasized_indices, DEFAULT_EMPHASIS_FRACTION};
pub use keywords::{KeywordFilter, DEFAULT_EXCLUDED_KEYWORDS, MIN_WORD_LEN};
pub use regions::{ExcludedRegion, ExcludedRegions, RegionDetector, RegionKind};
pub use words::{scan_words, WordScanner, WordToken};

static DEFAULT_ENGINE: Lazy<EmphasisEngine> = Lazy::new(EmphasisEngine::default);

/// Per-invocation settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Configuration {
    /// Leading portion of each word to emphasize, in `[0, 1]`
    pub emphasis_fraction: f64,
    /// When false the engine returns no ranges
    pub enabled: bool,
}

impl Configuration {
    /// Create a configuration, clamping the fraction
    pub fn new(emphasis_fraction: f64, enabled: bool) -> Self {
        Self {
            emphasis_fraction: clamp_fraction(emphasis_fraction),
            enabled,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            emphasis_fraction: DEFAULT_EMPHASIS_FRACTION,
            enabled: true,
        }
    }
}

/// One emphasized character, as the byte range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmphasisRange {
    pub start: usize,
    pub end: usize,
}

impl EmphasisRange {
    /// Range covering the single ASCII character at `offset`
    pub fn char_at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset + 1,
        }
    }
}

/// Computes emphasis ranges for a text
#[derive(Debug, Clone, Default)]
pub struct EmphasisEngine {
    detector: RegionDetector,
    keywords: KeywordFilter,
}

impl EmphasisEngine {
    /// Create an engine with a custom keyword set
    pub fn new(keywords: KeywordFilter) -> Self {
        Self {
            detector: RegionDetector::default(),
            keywords,
        }
    }

    /// Swap in a new keyword set; region rules are kept
    pub fn set_keywords(&mut self, keywords: KeywordFilter) {
        self.keywords = keywords;
    }

    /// Compute the emphasis ranges for `text`
    ///
    /// Returns an empty list when emphasis is disabled, which tells the
    /// host to clear anything it has painted.
    pub fn compute(&self, text: &str, config: &Configuration) -> Vec<EmphasisRange> {
        if !config.enabled {
            return Vec::new();
        }

        let fraction = clamp_fraction(config.emphasis_fraction);
        let regions = self.detector.detect(text);
        let mut ranges = Vec::new();
        let mut word_count = 0;

        for word in scan_words(text) {
            word_count += 1;
            if regions.contains(word.start) || self.keywords.is_excluded(word.text) {
                continue;
            }
            ranges.extend(
                emphasized_indices(word.text, fraction)
                    .map(|i| EmphasisRange::char_at(word.start + i)),
            );
        }

        debug!(
            bytes = text.len(),
            words = word_count,
            regions = regions.len(),
            ranges = ranges.len(),
            "computed emphasis"
        );
        ranges
    }
}

/// Compute emphasis ranges with the built-in keyword set
pub fn emphasize(text: &str, config: &Configuration) -> Vec<EmphasisRange> {
    DEFAULT_ENGINE.compute(text, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starts(text: &str, config: &Configuration) -> Vec<usize> {
        emphasize(text, config).iter().map(|r| r.start).collect()
    }

    /// Emphasized characters as a string, for readable assertions
    fn emphasized_chars(text: &str, config: &Configuration) -> String {
        emphasize(text, config)
            .iter()
            .map(|r| &text[r.start..r.end])
            .collect()
    }

    #[test]
    fn test_reading_at_half() {
        assert_eq!(starts("reading", &Configuration::default()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_capital_override() {
        let config = Configuration::new(0.0, true);
        assert_eq!(starts("McDonald", &config), vec![0, 2]);
    }

    #[test]
    fn test_disabled_is_empty() {
        assert!(emphasize("plenty of words here", &Configuration::disabled()).is_empty());
    }

    #[test]
    fn test_quoted_word_not_emphasized() {
        let text = r#"const s = "doNotEmphasize";"#;
        assert!(emphasize(text, &Configuration::default()).is_empty());
    }

    #[test]
    fn test_comment_words_not_emphasized() {
        let text = "total // running tally\n/* block\ncomment */ count";
        assert_eq!(emphasized_chars(text, &Configuration::default()), "totcou");
    }

    #[test]
    fn test_short_words_and_keywords_skipped() {
        let text = "if an function returns value";
        assert_eq!(emphasized_chars(text, &Configuration::default()), "retuval");
    }

    #[test]
    fn test_offsets_are_absolute() {
        let text = "  hello world";
        assert_eq!(starts(text, &Configuration::default()), vec![2, 3, 4, 8, 9, 10]);
    }

    #[test]
    fn test_unterminated_literal_does_not_abort() {
        let text = "before \"unterminated string";
        assert_eq!(
            emphasized_chars(text, &Configuration::default()),
            "befuntermstr"
        );
    }

    #[test]
    fn test_ranges_are_single_characters() {
        for range in emphasize("Bionic Reading Mode", &Configuration::new(0.7, true)) {
            assert_eq!(range.end - range.start, 1);
        }
    }

    #[test]
    fn test_custom_keywords() {
        let engine = EmphasisEngine::new(KeywordFilter::new(["struct"]));
        let ranges = engine.compute("struct function", &Configuration::new(1.0, true));
        let chars: String = ranges.iter().map(|r| &"struct function"[r.start..r.end]).collect();
        assert_eq!(chars, "function");
    }

    #[test]
    fn test_invalid_fraction_is_clamped() {
        let wild = Configuration {
            emphasis_fraction: 7.5,
            enabled: true,
        };
        assert_eq!(emphasized_chars("words", &wild), "words");
        let nan = Configuration {
            emphasis_fraction: f64::NAN,
            enabled: true,
        };
        assert_eq!(emphasized_chars("reading", &nan), "read");
    }

    #[test]
    fn test_idempotent() {
        let text = "Some `template\nliteral` and MoreText // trailing";
        let config = Configuration::new(0.4, true);
        assert_eq!(emphasize(text, &config), emphasize(text, &config));
    }
}
