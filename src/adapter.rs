//! Host adapter: events in, emphasis out
//!
//! The engine knows nothing about views or events. A host exposes its
//! views through [`TextView`] and its settings through [`Host`], and
//! publishes [`HostEvent`]s on an [`EventBus`]. The [`EmphasisAdapter`]
//! listens on the bus and repaints the active view when its text, the
//! active view itself, or the emphasis settings change.

use tracing::debug;

use crate::config::NAMESPACE;
use crate::emphasis::{Configuration, EmphasisEngine, EmphasisRange, KeywordFilter};
use crate::style::Style;

/// Identifies a view within its host
pub type ViewId = usize;

/// A view that shows text and can paint emphasis
pub trait TextView {
    fn id(&self) -> ViewId;

    /// Full current text of the document
    fn text(&self) -> &str;

    /// Replace all painted emphasis with exactly `ranges`
    ///
    /// An empty list clears the emphasis.
    fn apply_emphasis(&mut self, style: Style, ranges: Vec<EmphasisRange>);
}

/// The environment the adapter runs in
pub trait Host {
    /// The view that currently has focus, if any
    fn active_view(&mut self) -> Option<&mut dyn TextView>;

    /// Settings stored under `namespace`
    fn configuration(&self, namespace: &str) -> Configuration;

    /// Keywords never emphasized, as configured under `namespace`
    fn keyword_filter(&self, _namespace: &str) -> KeywordFilter {
        KeywordFilter::default()
    }
}

/// Something happened that may change what should be emphasized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Focus moved to another view (or to none)
    ActiveViewChanged,
    /// The text of a view changed
    TextChanged(ViewId),
    /// Settings in `section` changed
    SettingsChanged { section: String },
}

impl HostEvent {
    /// Settings change event for the emphasis namespace
    pub fn settings() -> Self {
        HostEvent::SettingsChanged {
            section: NAMESPACE.to_string(),
        }
    }
}

/// Observer of host events
pub trait HostListener {
    fn on_event(&mut self, event: &HostEvent, host: &mut dyn Host);
}

/// Delivers events to subscribed listeners in subscription order
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Box<dyn HostListener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn HostListener>) {
        self.listeners.push(listener);
    }

    pub fn publish(&mut self, event: &HostEvent, host: &mut dyn Host) {
        debug!(?event, listeners = self.listeners.len(), "publishing event");
        for listener in &mut self.listeners {
            listener.on_event(event, host);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Recomputes and applies emphasis for the active view
pub struct EmphasisAdapter {
    engine: EmphasisEngine,
    /// Created once; every view is painted with it
    style: Style,
    namespace: String,
}

impl EmphasisAdapter {
    pub fn new(engine: EmphasisEngine, style: Style) -> Self {
        Self {
            engine,
            style,
            namespace: NAMESPACE.to_string(),
        }
    }

    /// Recompute emphasis for the active view
    ///
    /// Returns false when there is no active view.
    pub fn refresh(&self, host: &mut dyn Host) -> bool {
        let config = host.configuration(&self.namespace);
        let Some(view) = host.active_view() else {
            debug!("no active view");
            return false;
        };
        let ranges = self.engine.compute(view.text(), &config);
        debug!(view = view.id(), ranges = ranges.len(), "applying emphasis");
        view.apply_emphasis(self.style, ranges);
        true
    }

    /// Check if an event should trigger a refresh
    fn is_relevant(&self, event: &HostEvent, host: &mut dyn Host) -> bool {
        match event {
            HostEvent::ActiveViewChanged => true,
            HostEvent::TextChanged(id) => host.active_view().is_some_and(|view| view.id() == *id),
            HostEvent::SettingsChanged { section } => *section == self.namespace,
        }
    }
}

impl Default for EmphasisAdapter {
    fn default() -> Self {
        Self::new(EmphasisEngine::default(), Style::bold())
    }
}

impl HostListener for EmphasisAdapter {
    fn on_event(&mut self, event: &HostEvent, host: &mut dyn Host) {
        if !self.is_relevant(event, host) {
            return;
        }
        if matches!(event, HostEvent::SettingsChanged { .. }) {
            let keywords = host.keyword_filter(&self.namespace);
            debug!(keywords = keywords.len(), "reloading keyword list");
            self.engine.set_keywords(keywords);
        }
        self.refresh(host);
    }
}
