//! Reader state and main loop

use std::time::Duration;

use tracing::{info, warn};

use crate::adapter::{EmphasisAdapter, EventBus, HostEvent, TextView};
use crate::display::Display;
use crate::emphasis::EmphasisEngine;
use crate::error::Result;
use crate::input::{translate_key, Action};
use crate::style::Style;
use crate::terminal::Terminal;
use crate::workspace::Workspace;

/// How often files are checked for outside changes
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Interactive reader: a workspace, the event bus, and the terminal
pub struct Viewer {
    pub workspace: Workspace,
    bus: EventBus,
    terminal: Terminal,
    display: Display,
    running: bool,
}

impl Viewer {
    /// Create a reader and subscribe the emphasis adapter
    ///
    /// The adapter starts with the configured keyword list and picks up a
    /// new one on every settings change.
    pub fn new(workspace: Workspace, terminal: Terminal) -> Self {
        let engine = EmphasisEngine::new(workspace.settings.config.keyword_filter());
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(EmphasisAdapter::new(engine, Style::bold())));

        Self {
            workspace,
            bus,
            terminal,
            display: Display::new(),
            running: true,
        }
    }

    fn publish(&mut self, event: HostEvent) {
        self.bus.publish(&event, &mut self.workspace);
    }

    /// Run the main loop until quit
    pub fn run(&mut self) -> Result<()> {
        self.publish(HostEvent::ActiveViewChanged);
        self.display.force_redraw();

        while self.running {
            self.display.render(&mut self.terminal, &self.workspace)?;

            let mut resized = false;
            let key = self.terminal.poll_key(POLL_INTERVAL, &mut resized)?;
            if resized {
                self.display.force_redraw();
            }
            match key {
                Some(key_event) => {
                    if let Some(action) = translate_key(key_event) {
                        self.handle_action(action)?;
                    }
                }
                None => self.check_for_changes(),
            }
        }

        Ok(())
    }

    /// Pick up documents and settings changed outside the reader
    fn check_for_changes(&mut self) {
        let outcome = self.workspace.reload_changed();
        for id in outcome.reloaded {
            self.publish(HostEvent::TextChanged(id));
        }
        if let Some((id, e)) = outcome.failed.first() {
            let name = self
                .workspace
                .views()
                .iter()
                .find(|view| view.id() == *id)
                .map_or("document", |view| view.name());
            self.display.set_message(format!("Reload of {} failed: {}", name, e));
        }
        if self.workspace.settings.reload_if_changed() {
            self.display.set_message("Settings reloaded");
            self.publish(HostEvent::settings());
        }
    }

    /// Handle one action
    fn handle_action(&mut self, action: Action) -> Result<()> {
        self.display.clear_message();
        let page = Display::text_rows(&self.terminal).max(1);

        match action {
            Action::Quit => {
                info!("quit");
                self.running = false;
            }
            Action::NextView | Action::PrevView => {
                let switched = if action == Action::NextView {
                    self.workspace.next_view()
                } else {
                    self.workspace.prev_view()
                };
                if switched {
                    self.publish(HostEvent::ActiveViewChanged);
                    self.display.force_redraw();
                } else {
                    self.display.set_message("No other document");
                }
            }
            Action::LineDown => self.scroll(1),
            Action::LineUp => self.scroll(-1),
            Action::PageDown => self.scroll(page as isize),
            Action::PageUp => self.scroll(-(page as isize)),
            Action::Top => {
                if let Some(view) = self.workspace.active_mut() {
                    view.scroll_to_top();
                }
            }
            Action::Bottom => {
                if let Some(view) = self.workspace.active_mut() {
                    view.scroll_to_bottom(page);
                }
            }
            Action::ToggleEmphasis => {
                let enabled = self.workspace.toggle_enabled();
                self.display
                    .set_message(if enabled { "Emphasis on" } else { "Emphasis off" });
                self.publish(HostEvent::settings());
            }
            Action::IncreaseFraction | Action::DecreaseFraction => {
                let steps = if action == Action::IncreaseFraction { 1 } else { -1 };
                let fraction = self.workspace.adjust_fraction(steps);
                self.display
                    .set_message(format!("Emphasis {:.0}% of each word", fraction * 100.0));
                self.publish(HostEvent::settings());
            }
            Action::Reload => self.reload_active()?,
        }

        Ok(())
    }

    fn scroll(&mut self, delta: isize) {
        if let Some(view) = self.workspace.active_mut() {
            view.scroll_by(delta);
        }
    }

    /// Re-read the active document from disk
    fn reload_active(&mut self) -> Result<()> {
        let Some(view) = self.workspace.active_mut() else {
            return Ok(());
        };
        match view.reload() {
            Ok(()) => {
                let id = view.id();
                self.display.set_message("Reloaded");
                self.publish(HostEvent::TextChanged(id));
            }
            Err(e) => {
                warn!(error = %e, "reload failed");
                self.display.set_message(format!("Reload failed: {}", e));
            }
        }
        self.display.force_redraw();
        Ok(())
    }
}
