//! Document views - text with its line index, scroll position and emphasis

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::info;

use crate::adapter::{TextView, ViewId};
use crate::emphasis::EmphasisRange;
use crate::error::{BionicError, Result};
use crate::style::{Span, Style};

/// A document shown in the reader
#[derive(Debug)]
pub struct DocumentView {
    id: ViewId,
    /// Display name (file name, or given name for in-memory text)
    name: String,
    /// Backing file, if any
    path: Option<PathBuf>,
    text: String,
    /// Byte offset where each line starts
    line_starts: Vec<usize>,
    /// First visible line
    top_line: usize,
    /// Emphasis as last applied, sorted by start
    emphasis: Vec<EmphasisRange>,
    emphasis_style: Style,
    /// File modification time at last (re)load
    modified: Option<SystemTime>,
}

impl DocumentView {
    /// Create a view over in-memory text
    pub fn from_text(id: ViewId, name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut view = Self {
            id,
            name: name.into(),
            path: None,
            text: String::new(),
            line_starts: Vec::new(),
            top_line: 0,
            emphasis: Vec::new(),
            emphasis_style: Style::bold(),
            modified: None,
        };
        view.set_text(text.into());
        view
    }

    /// Create a view from file contents
    pub fn from_file(id: ViewId, path: &Path) -> Result<Self> {
        let text = read_document(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        let mut view = Self::from_text(id, name, text);
        view.path = Some(path.to_path_buf());
        view.modified = modification_time(path);
        info!(path = %path.display(), bytes = view.text.len(), "opened document");
        Ok(view)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the text and rebuild the line index
    ///
    /// Painted emphasis is dropped; it refers to the old text.
    pub fn set_text(&mut self, text: String) {
        self.line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        self.text = text;
        self.emphasis.clear();
        self.top_line = self.top_line.min(self.line_count().saturating_sub(1));
    }

    /// Re-read the backing file
    pub fn reload(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        let text = read_document(&path)?;
        self.modified = modification_time(&path);
        self.set_text(text);
        info!(path = %path.display(), "reloaded document");
        Ok(())
    }

    /// Reload if the backing file changed on disk since the last load
    ///
    /// Returns true when the text was reloaded. A failed read is reported
    /// once per change; the old text stays until the file changes again.
    pub fn reload_if_changed(&mut self) -> Result<bool> {
        let Some(path) = &self.path else {
            return Ok(false);
        };
        let current = modification_time(path);
        if current.is_none() || current == self.modified {
            return Ok(false);
        }
        self.modified = current;
        self.reload()?;
        Ok(true)
    }

    /// Get number of lines
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where a line starts
    pub fn line_start(&self, idx: usize) -> Option<usize> {
        self.line_starts.get(idx).copied()
    }

    /// Text of a line, without its line terminator
    pub fn line(&self, idx: usize) -> Option<&str> {
        let start = self.line_start(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.text.len(), |next| next - 1);
        let line = &self.text[start..end];
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    /// Emphasis currently painted
    pub fn emphasis(&self) -> &[EmphasisRange] {
        &self.emphasis
    }

    /// Emphasis of one line as styled spans relative to the line start
    ///
    /// Adjacent emphasized characters are merged into one span.
    pub fn line_spans(&self, idx: usize) -> Vec<Span> {
        let (Some(start), Some(line)) = (self.line_start(idx), self.line(idx)) else {
            return Vec::new();
        };
        let end = start + line.len();

        let first = self.emphasis.partition_point(|r| r.start < start);
        let mut spans: Vec<Span> = Vec::new();
        for range in self.emphasis[first..].iter().take_while(|r| r.start < end) {
            let (rel_start, rel_end) = (range.start - start, range.end.min(end) - start);
            match spans.last_mut() {
                Some(last) if last.end >= rel_start => last.end = last.end.max(rel_end),
                _ => spans.push(Span::new(rel_start, rel_end, self.emphasis_style)),
            }
        }
        spans
    }

    /// Get the top visible line
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Scroll by `delta` lines, keeping at least one line visible
    pub fn scroll_by(&mut self, delta: isize) {
        let last = self.line_count().saturating_sub(1);
        let target = self.top_line.saturating_add_signed(delta);
        self.top_line = target.min(last);
    }

    pub fn scroll_to_top(&mut self) {
        self.top_line = 0;
    }

    /// Scroll so the last page of `height` lines is visible
    pub fn scroll_to_bottom(&mut self, height: usize) {
        self.top_line = self.line_count().saturating_sub(height.max(1));
    }
}

impl TextView for DocumentView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn apply_emphasis(&mut self, style: Style, mut ranges: Vec<EmphasisRange>) {
        // Scan order is already ascending; sorting keeps lookups valid for
        // any producer.
        ranges.sort_unstable();
        self.emphasis = ranges;
        self.emphasis_style = style;
    }
}

/// Read a document, mapping a missing file to `FileNotFound`
fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => BionicError::FileNotFound(path.display().to_string()),
        _ => BionicError::Io(e),
    })
}

fn modification_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
