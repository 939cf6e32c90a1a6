//! Input handling - key translation

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the reader to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextView,
    PrevView,
    LineDown,
    LineUp,
    PageDown,
    PageUp,
    Top,
    Bottom,
    ToggleEmphasis,
    IncreaseFraction,
    DecreaseFraction,
    Reload,
}

impl Action {
    /// Human-readable name, for the help text
    pub fn name(&self) -> &'static str {
        match self {
            Action::Quit => "quit",
            Action::NextView => "next-view",
            Action::PrevView => "previous-view",
            Action::LineDown => "line-down",
            Action::LineUp => "line-up",
            Action::PageDown => "page-down",
            Action::PageUp => "page-up",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::ToggleEmphasis => "toggle-emphasis",
            Action::IncreaseFraction => "more-emphasis",
            Action::DecreaseFraction => "less-emphasis",
            Action::Reload => "reload",
        }
    }
}

/// Key bindings, in the order shown by `--help`
pub const KEY_BINDINGS: &[(&str, Action)] = &[
    ("q, Esc, C-c", Action::Quit),
    ("Tab, n", Action::NextView),
    ("BackTab, p", Action::PrevView),
    ("Down, j", Action::LineDown),
    ("Up, k", Action::LineUp),
    ("PageDown, Space, C-v", Action::PageDown),
    ("PageUp, b, M-v", Action::PageUp),
    ("Home, g", Action::Top),
    ("End, G", Action::Bottom),
    ("t, C-t", Action::ToggleEmphasis),
    ("+, =", Action::IncreaseFraction),
    ("-", Action::DecreaseFraction),
    ("r", Action::Reload),
];

/// Translate a crossterm key event into an action
///
/// Only key presses count; releases and repeats reported by some
/// terminals are ignored.
pub fn translate_key(event: KeyEvent) -> Option<Action> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);

    let action = match event.code {
        KeyCode::Char('c') if ctrl => Action::Quit,
        KeyCode::Char('v') if ctrl => Action::PageDown,
        KeyCode::Char('t') if ctrl => Action::ToggleEmphasis,
        KeyCode::Char('v') if alt => Action::PageUp,
        _ if ctrl || alt => return None,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Tab | KeyCode::Char('n') => Action::NextView,
        KeyCode::BackTab | KeyCode::Char('p') => Action::PrevView,
        KeyCode::Down | KeyCode::Char('j') => Action::LineDown,
        KeyCode::Up | KeyCode::Char('k') => Action::LineUp,
        KeyCode::PageDown | KeyCode::Char(' ') => Action::PageDown,
        KeyCode::PageUp | KeyCode::Char('b') => Action::PageUp,
        KeyCode::Home | KeyCode::Char('g') => Action::Top,
        KeyCode::End | KeyCode::Char('G') => Action::Bottom,
        KeyCode::Char('t') => Action::ToggleEmphasis,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::IncreaseFraction,
        KeyCode::Char('-') => Action::DecreaseFraction,
        KeyCode::Char('r') => Action::Reload,
        _ => return None,
    };
    Some(action)
}
