//! Excluded region detection
//!
//! Quoted literals and comments never receive emphasis. They are found
//! with a lexical regex scan over the whole text, one rule per kind:
//!
//! - quoted: `"..."` and `'...'` end at the line, `` `...` `` may span lines.
//!   The shortest span between two quotes of the same kind wins; other
//!   quote kinds inside are plain characters and escapes are not honored.
//! - comment: `//` to end of line, or `/*` to the nearest `*/`.
//!
//! An opening delimiter with no matching close produces no region.

use once_cell::sync::Lazy;
use regex::Regex;

const QUOTED_PATTERN: &str = r#""[^"\n]*"|'[^'\n]*'|`[^`]*`"#;
const COMMENT_PATTERN: &str = r"(?m)//.*$|/\*(?s:.*?)\*/";

/// Built-in rules, compiled once
static DEFAULT_RULES: Lazy<Vec<RegionRule>> = Lazy::new(|| {
    [
        RegionRule::new(QUOTED_PATTERN, RegionKind::Quoted),
        RegionRule::new(COMMENT_PATTERN, RegionKind::Comment),
    ]
    .into_iter()
    .flatten()
    .collect()
});

/// What kind of construct a region covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// String, character or template literal
    Quoted,
    /// Line or block comment
    Comment,
}

/// A half-open byte interval `[start, end)` that must not be emphasized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcludedRegion {
    pub start: usize,
    pub end: usize,
    pub kind: RegionKind,
}

impl ExcludedRegion {
    pub fn new(start: usize, end: usize, kind: RegionKind) -> Self {
        Self { start, end, kind }
    }

    /// Check if this region contains a byte offset
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A regex rule producing regions of one kind
#[derive(Debug, Clone)]
pub struct RegionRule {
    pub pattern: Regex,
    pub kind: RegionKind,
}

impl RegionRule {
    /// Create a new rule; `None` if the pattern does not compile
    pub fn new(pattern: &str, kind: RegionKind) -> Option<Self> {
        Regex::new(pattern).ok().map(|regex| Self {
            pattern: regex,
            kind,
        })
    }

    /// All non-overlapping matches, leftmost first
    pub fn find_all<'a>(&'a self, text: &'a str) -> impl Iterator<Item = ExcludedRegion> + 'a {
        self.pattern
            .find_iter(text)
            .map(move |m| ExcludedRegion::new(m.start(), m.end(), self.kind))
    }
}

/// The region set of one text
///
/// Regions from different rules may overlap; they are kept as found.
/// Lookups go through an index sorted by start with a running maximum
/// of end offsets, so `contains` is a binary search.
#[derive(Debug, Clone, Default)]
pub struct ExcludedRegions {
    regions: Vec<ExcludedRegion>,
    /// `reach[i]` = max end over `regions[..=i]`, regions sorted by start
    reach: Vec<usize>,
}

impl ExcludedRegions {
    pub fn new(mut regions: Vec<ExcludedRegion>) -> Self {
        regions.sort_by_key(|r| r.start);
        let reach = regions
            .iter()
            .scan(0, |max_end, r| {
                *max_end = (*max_end).max(r.end);
                Some(*max_end)
            })
            .collect();
        Self { regions, reach }
    }

    /// Check if an offset falls inside at least one region
    pub fn contains(&self, offset: usize) -> bool {
        let starting_before = self.regions.partition_point(|r| r.start <= offset);
        starting_before > 0 && self.reach[starting_before - 1] > offset
    }

    /// Regions sorted by start offset
    pub fn regions(&self) -> &[ExcludedRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Finds quoted literals and comments
#[derive(Debug, Clone)]
pub struct RegionDetector {
    rules: Vec<RegionRule>,
}

impl RegionDetector {
    /// Create a detector from explicit rules
    pub fn with_rules(rules: Vec<RegionRule>) -> Self {
        Self { rules }
    }

    /// Run every rule over the whole text
    pub fn detect(&self, text: &str) -> ExcludedRegions {
        let regions = self
            .rules
            .iter()
            .flat_map(|rule| rule.find_all(text))
            .collect();
        ExcludedRegions::new(regions)
    }

    pub fn rules(&self) -> &[RegionRule] {
        &self.rules
    }
}

impl Default for RegionDetector {
    fn default() -> Self {
        Self::with_rules(DEFAULT_RULES.clone())
    }
}

/// Detect regions with the built-in quote and comment rules
pub fn detect_excluded_regions(text: &str) -> ExcludedRegions {
    RegionDetector::default().detect(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str, kind: RegionKind) -> Vec<(usize, usize)> {
        detect_excluded_regions(text)
            .regions()
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| (r.start, r.end))
            .collect()
    }

    #[test]
    fn test_default_rules_compile() {
        let detector = RegionDetector::default();
        assert_eq!(detector.rules().len(), 2);
    }

    #[test]
    fn test_double_quoted() {
        let text = r#"const s = "doNotEmphasize";"#;
        assert_eq!(spans(text, RegionKind::Quoted), vec![(10, 26)]);
    }

    #[test]
    fn test_shortest_match() {
        let text = r#"a "one" b "two" c"#;
        assert_eq!(spans(text, RegionKind::Quoted), vec![(2, 7), (10, 15)]);
    }

    #[test]
    fn test_other_quote_kind_is_not_a_delimiter() {
        let text = r#"say "don't" now"#;
        assert_eq!(spans(text, RegionKind::Quoted), vec![(4, 11)]);
    }

    #[test]
    fn test_backtick_spans_lines() {
        let text = "let t = `first\nsecond`;";
        assert_eq!(spans(text, RegionKind::Quoted), vec![(8, 22)]);
    }

    #[test]
    fn test_double_quote_stops_at_line_end() {
        let text = "a \"open\nclose\" b";
        assert!(spans(text, RegionKind::Quoted).is_empty());
    }

    #[test]
    fn test_unterminated_quote() {
        let text = "let s = \"never closed";
        let regions = detect_excluded_regions(text);
        assert!(regions.is_empty());
        assert!(!regions.contains(9));
    }

    #[test]
    fn test_line_comment() {
        let text = "code // comment here\nnext";
        assert_eq!(spans(text, RegionKind::Comment), vec![(5, 20)]);
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let text = "a /* one\ntwo */ b /* three */";
        assert_eq!(spans(text, RegionKind::Comment), vec![(2, 15), (18, 29)]);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let text = "a /* never closed\nmore text";
        assert!(spans(text, RegionKind::Comment).is_empty());
    }

    #[test]
    fn test_block_marker_inside_line_comment() {
        // The line comment consumes the `/*`, so no block comment starts there
        let text = "x // see /* here\ny */ z";
        assert_eq!(spans(text, RegionKind::Comment), vec![(2, 16)]);
    }

    #[test]
    fn test_overlapping_regions_are_kept() {
        let text = "// it's \"quoted\"";
        let regions = detect_excluded_regions(text);
        assert_eq!(regions.len(), 2);
        assert!(regions.contains(0));
        assert!(regions.contains(10));
        assert!(!regions.contains(text.len()));
    }

    #[test]
    fn test_contains_with_nested_intervals() {
        let regions = ExcludedRegions::new(vec![
            ExcludedRegion::new(10, 12, RegionKind::Quoted),
            ExcludedRegion::new(0, 20, RegionKind::Comment),
            ExcludedRegion::new(30, 35, RegionKind::Quoted),
        ]);
        assert!(regions.contains(0));
        assert!(regions.contains(15));
        assert!(regions.contains(19));
        assert!(!regions.contains(20));
        assert!(!regions.contains(29));
        assert!(regions.contains(30));
        assert!(!regions.contains(35));
    }

    #[test]
    fn test_region_bounds() {
        let region = ExcludedRegion::new(5, 10, RegionKind::Comment);
        assert!(!region.contains(4));
        assert!(region.contains(5));
        assert!(region.contains(9));
        assert!(!region.contains(10));
        assert_eq!(region.len(), 5);
    }
}
