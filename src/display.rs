//! Display rendering

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Attribute, Print, SetAttribute},
};
use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::style::{Span, Style};
use crate::terminal::{queue_style, Terminal};
use crate::view::DocumentView;
use crate::workspace::Workspace;

/// Columns a tab expands to
const TAB_WIDTH: usize = 4;

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

/// Split a line into styled runs, expanding tabs, cut at `max_cols`
pub fn styled_segments(line: &str, spans: &[Span], max_cols: usize) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut width = 0;
    let mut spans = spans.iter().peekable();

    for (byte_pos, ch) in line.char_indices() {
        while spans.next_if(|s| s.end <= byte_pos).is_some() {}
        let style = spans
            .peek()
            .filter(|s| s.contains(byte_pos))
            .map_or(Style::default(), |s| s.style);

        let (piece, ch_width) = if ch == '\t' {
            (" ".repeat(TAB_WIDTH), TAB_WIDTH)
        } else {
            (ch.to_string(), unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1))
        };
        if width + ch_width > max_cols {
            break;
        }
        width += ch_width;

        match segments.last_mut() {
            Some(last) if last.style == style => last.text.push_str(&piece),
            _ => segments.push(Segment { text: piece, style }),
        }
    }

    segments
}

/// Display state
pub struct Display {
    /// Whether a full redraw is needed
    needs_redraw: bool,
    /// Message to show on the bottom line
    message: Option<String>,
}

impl Display {
    pub fn new() -> Self {
        Self {
            needs_redraw: true,
            message: None,
        }
    }

    /// Mark that a full redraw is needed
    pub fn force_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Set a message to display
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Clear the message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Rows available for document text (status and message lines excluded)
    pub fn text_rows(terminal: &Terminal) -> usize {
        terminal.rows().saturating_sub(2) as usize
    }

    /// Render the active view, status line and message line
    pub fn render(&mut self, terminal: &mut Terminal, workspace: &Workspace) -> Result<()> {
        let cols = terminal.cols() as usize;
        let rows = terminal.rows();
        let height = Self::text_rows(terminal);

        if self.needs_redraw {
            terminal.clear_screen()?;
        }

        match workspace.active() {
            Some(view) => self.render_view(terminal, view, height, cols)?,
            None => {
                for row in 0..height {
                    terminal.move_cursor(row as u16, 0)?;
                    terminal.clear_to_eol()?;
                }
            }
        }

        self.render_status_line(terminal, workspace, height as u16, cols)?;
        self.render_message_line(terminal, rows.saturating_sub(1), cols)?;

        terminal.flush()?;
        self.needs_redraw = false;
        Ok(())
    }

    /// Render the visible lines of a view
    fn render_view(
        &self,
        terminal: &mut Terminal,
        view: &DocumentView,
        height: usize,
        cols: usize,
    ) -> Result<()> {
        let top_line = view.top_line();

        for row_offset in 0..height {
            let line_idx = top_line + row_offset;
            terminal.move_cursor(row_offset as u16, 0)?;

            if let Some(line) = view.line(line_idx) {
                let spans = view.line_spans(line_idx);
                for segment in styled_segments(line, &spans, cols) {
                    terminal.apply_style(&segment.style)?;
                    terminal.write_str(&segment.text)?;
                    terminal.reset_attributes()?;
                }
            } else {
                // Empty line indicator (like vim's ~)
                terminal.apply_style(&Style::dim())?;
                terminal.write_str("~")?;
                terminal.reset_attributes()?;
            }

            terminal.clear_to_eol()?;
        }

        Ok(())
    }

    /// Render the status line
    fn render_status_line(
        &self,
        terminal: &mut Terminal,
        workspace: &Workspace,
        row: u16,
        cols: usize,
    ) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        terminal.apply_style(&Style::reverse())?;

        let status = fill_to_width(&status_text(workspace), cols, '-');
        terminal.write_str(&status)?;
        terminal.reset_attributes()?;
        terminal.clear_to_eol()?;
        Ok(())
    }

    /// Render the message line
    fn render_message_line(&self, terminal: &mut Terminal, row: u16, cols: usize) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        if let Some(ref msg) = self.message {
            terminal.write_str(&truncate_to_width(msg, cols))?;
        }
        terminal.clear_to_eol()?;
        Ok(())
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

/// Status line content
///
/// Format: `-- bionic: name [1/2] L1/40 -- on 50% --`
pub fn status_text(workspace: &Workspace) -> String {
    let config = &workspace.settings.config;
    let emphasis = if config.enabled {
        format!("on {:.0}%", config.percentage_of_word * 100.0)
    } else {
        "off".to_string()
    };

    match (workspace.active(), workspace.active_index()) {
        (Some(view), Some(idx)) => format!(
            "-- bionic: {} [{}/{}] L{}/{} -- {} --",
            view.name(),
            idx + 1,
            workspace.view_count(),
            view.top_line() + 1,
            view.line_count(),
            emphasis
        ),
        _ => format!("-- bionic: no document -- {} --", emphasis),
    }
}

/// Write a whole document with its emphasis as ANSI-styled text
pub fn print_document<W: Write>(out: &mut W, view: &DocumentView) -> io::Result<()> {
    for line_idx in 0..view.line_count() {
        let Some(line) = view.line(line_idx) else {
            break;
        };
        let spans = view.line_spans(line_idx);
        for segment in styled_segments(line, &spans, usize::MAX) {
            if segment.style.is_default() {
                queue!(out, Print(&segment.text))?;
            } else {
                queue_style(out, &segment.style)?;
                queue!(out, Print(&segment.text), SetAttribute(Attribute::Reset))?;
            }
        }
        if line_idx + 1 < view.line_count() {
            queue!(out, Print("\n"))?;
        }
    }
    out.flush()
}

/// Pad with `fill` or truncate so the text is exactly `cols` wide
///
/// A wide character that does not fit is dropped, which can leave the
/// result one column short.
fn fill_to_width(s: &str, cols: usize, fill: char) -> String {
    let width = UnicodeWidthStr::width(s);
    if width < cols {
        let mut padded = s.to_string();
        padded.extend(std::iter::repeat(fill).take(cols - width));
        padded
    } else {
        truncate_to_width(s, cols)
    }
}

/// Truncate a string to fit within a display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}
