//! Workspace - the open documents, which one is active, and the settings

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{info, warn};

use crate::adapter::{Host, TextView, ViewId};
use crate::config::{Config, NAMESPACE};
use crate::emphasis::{Configuration, KeywordFilter};
use crate::error::{BionicError, Result};
use crate::view::DocumentView;

/// Step used by the fraction up/down commands
pub const FRACTION_STEP: f64 = 0.1;

/// Settings plus where they came from
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub config: Config,
    /// Settings file, if one is watched
    path: Option<PathBuf>,
    modified: Option<SystemTime>,
}

impl Settings {
    /// Settings not backed by a file
    pub fn in_memory(config: Config) -> Self {
        Self {
            config,
            path: None,
            modified: None,
        }
    }

    /// Load settings from `path` and remember it for change detection
    pub fn from_file(path: PathBuf) -> Self {
        let config = Config::load_or_default(&path);
        let modified = modification_time(&path);
        Self {
            config,
            path: Some(path),
            modified,
        }
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        match Config::config_path() {
            Some(path) => Self::from_file(path),
            None => Self::default(),
        }
    }

    /// Reload if the settings file appeared, changed or disappeared
    ///
    /// Returns true when the settings were reloaded.
    pub fn reload_if_changed(&mut self) -> bool {
        let Some(path) = &self.path else {
            return false;
        };
        let current = modification_time(path);
        if current == self.modified {
            return false;
        }
        self.modified = current;
        self.config = Config::load_or_default(path);
        info!(path = %path.display(), "settings changed on disk");
        true
    }
}

/// Result of polling the open documents for changes on disk
#[derive(Debug, Default)]
pub struct ReloadOutcome {
    /// Views whose text was replaced
    pub reloaded: Vec<ViewId>,
    /// Views that could not be re-read
    pub failed: Vec<(ViewId, BionicError)>,
}

/// Open documents and settings; the host side of the adapter
#[derive(Debug, Default)]
pub struct Workspace {
    views: Vec<DocumentView>,
    active: Option<usize>,
    pub settings: Settings,
}

impl Workspace {
    pub fn new(settings: Settings) -> Self {
        Self {
            views: Vec::new(),
            active: None,
            settings,
        }
    }

    fn next_id(&self) -> ViewId {
        self.views.iter().map(|v| v.id() + 1).max().unwrap_or(0)
    }

    /// Open a file as a new view; the first view opened becomes active
    pub fn open_file(&mut self, path: &Path) -> Result<ViewId> {
        let view = DocumentView::from_file(self.next_id(), path)?;
        Ok(self.add_view(view))
    }

    /// Add in-memory text as a new view
    pub fn open_text(&mut self, name: &str, text: &str) -> ViewId {
        let view = DocumentView::from_text(self.next_id(), name, text);
        self.add_view(view)
    }

    fn add_view(&mut self, view: DocumentView) -> ViewId {
        let id = view.id();
        self.views.push(view);
        if self.active.is_none() {
            self.active = Some(0);
        }
        id
    }

    pub fn views(&self) -> &[DocumentView] {
        &self.views
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Index of the active view
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&DocumentView> {
        self.active.and_then(|idx| self.views.get(idx))
    }

    pub fn active_mut(&mut self) -> Option<&mut DocumentView> {
        self.active.and_then(|idx| self.views.get_mut(idx))
    }

    /// Make the next view active, wrapping around
    ///
    /// Returns false when there is nothing to switch to.
    pub fn next_view(&mut self) -> bool {
        self.cycle(1)
    }

    /// Make the previous view active, wrapping around
    pub fn prev_view(&mut self) -> bool {
        self.cycle(self.views.len().saturating_sub(1))
    }

    fn cycle(&mut self, step: usize) -> bool {
        let count = self.views.len();
        match self.active {
            Some(idx) if count > 1 => {
                self.active = Some((idx + step) % count);
                true
            }
            _ => false,
        }
    }

    /// Reload every document whose file changed
    ///
    /// A document that fails to reload keeps its old text and is reported
    /// in `failed`; the rest are still checked.
    pub fn reload_changed(&mut self) -> ReloadOutcome {
        let mut outcome = ReloadOutcome::default();
        for view in &mut self.views {
            match view.reload_if_changed() {
                Ok(true) => outcome.reloaded.push(view.id()),
                Ok(false) => {}
                Err(e) => {
                    warn!(view = view.id(), name = view.name(), error = %e, "reload failed");
                    outcome.failed.push((view.id(), e));
                }
            }
        }
        outcome
    }

    pub fn toggle_enabled(&mut self) -> bool {
        self.settings.config.toggle_enabled();
        self.settings.config.enabled
    }

    /// Change the fraction by `steps` increments of [`FRACTION_STEP`]
    pub fn adjust_fraction(&mut self, steps: i32) -> f64 {
        self.settings.config.adjust_fraction(FRACTION_STEP * f64::from(steps));
        self.settings.config.percentage_of_word
    }
}

impl Host for Workspace {
    fn active_view(&mut self) -> Option<&mut dyn TextView> {
        self.active_mut().map(|view| view as &mut dyn TextView)
    }

    fn configuration(&self, namespace: &str) -> Configuration {
        if namespace == NAMESPACE {
            self.settings.config.configuration()
        } else {
            Configuration::default()
        }
    }

    fn keyword_filter(&self, namespace: &str) -> KeywordFilter {
        if namespace == NAMESPACE {
            self.settings.config.keyword_filter()
        } else {
            KeywordFilter::default()
        }
    }
}

fn modification_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{EmphasisAdapter, EventBus, HostEvent};
    use crate::emphasis::EmphasisEngine;
    use crate::style::Style;

    fn workspace(texts: &[&str]) -> Workspace {
        let mut ws = Workspace::default();
        for (i, text) in texts.iter().enumerate() {
            ws.open_text(&format!("doc{i}"), text);
        }
        ws
    }

    #[test]
    fn test_first_view_becomes_active() {
        let mut ws = Workspace::default();
        assert!(ws.active().is_none());
        assert!(ws.active_view().is_none());
        ws.open_text("a", "alpha");
        ws.open_text("b", "beta");
        assert_eq!(ws.active_index(), Some(0));
        assert_eq!(ws.active().unwrap().name(), "a");
    }

    #[test]
    fn test_view_cycling() {
        let mut ws = workspace(&["one", "two", "three"]);
        assert!(ws.next_view());
        assert_eq!(ws.active_index(), Some(1));
        assert!(ws.prev_view());
        assert!(ws.prev_view());
        assert_eq!(ws.active_index(), Some(2));
        assert!(ws.next_view());
        assert_eq!(ws.active_index(), Some(0));
    }

    #[test]
    fn test_single_view_does_not_cycle() {
        let mut ws = workspace(&["only"]);
        assert!(!ws.next_view());
        assert!(!ws.prev_view());
    }

    #[test]
    fn test_view_ids_unique() {
        let ws = workspace(&["a", "b", "c"]);
        let ids: Vec<_> = ws.views().iter().map(|v| v.id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_configuration_namespace() {
        let config = Config {
            percentage_of_word: 0.2,
            ..Config::default()
        };
        let ws = Workspace::new(Settings::in_memory(config));
        assert_eq!(ws.configuration(NAMESPACE).emphasis_fraction, 0.2);
        assert_eq!(ws.configuration("elsewhere"), Configuration::default());
    }

    #[test]
    fn test_settings_commands() {
        let mut ws = workspace(&["x"]);
        assert!(!ws.toggle_enabled());
        assert!(ws.toggle_enabled());
        assert_eq!(ws.adjust_fraction(2), 0.7);
        assert_eq!(ws.adjust_fraction(-10), 0.0);
    }

    #[test]
    fn test_adapter_paints_workspace() {
        let mut ws = workspace(&["reading", "McDonald farm"]);
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(EmphasisAdapter::default()));

        bus.publish(&HostEvent::ActiveViewChanged, &mut ws);
        assert_eq!(ws.views()[0].emphasis().len(), 4);
        assert!(ws.views()[1].emphasis().is_empty());

        ws.next_view();
        bus.publish(&HostEvent::ActiveViewChanged, &mut ws);
        assert!(!ws.views()[1].emphasis().is_empty());

        ws.toggle_enabled();
        bus.publish(&HostEvent::settings(), &mut ws);
        assert!(ws.views()[1].emphasis().is_empty());
        assert_eq!(ws.views()[0].emphasis().len(), 4);
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("bionic-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_reload_continues_past_unreadable_document() {
        let bad = temp_path("bad.txt");
        let good = temp_path("good.txt");
        fs::write(&bad, "alpha").unwrap();
        fs::write(&good, "beta").unwrap();

        let mut ws = Workspace::default();
        let bad_id = ws.open_file(&bad).unwrap();
        let good_id = ws.open_file(&good).unwrap();

        // Make sure the modification times move past the initial load
        std::thread::sleep(std::time::Duration::from_millis(20));
        fs::write(&bad, b"bad \xff byte").unwrap();
        fs::write(&good, "beta changed").unwrap();

        let outcome = ws.reload_changed();
        assert_eq!(outcome.reloaded, vec![good_id]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, bad_id);
        assert_eq!(ws.views()[0].text(), "alpha");
        assert_eq!(ws.views()[1].text(), "beta changed");

        fs::remove_file(&bad).unwrap();
        fs::remove_file(&good).unwrap();
    }

    #[test]
    fn test_settings_reload_updates_keywords() {
        let path = temp_path("keywords.toml");
        fs::write(&path, "[bionic-reading]\nexcluded-keywords = []\n").unwrap();

        let mut ws = Workspace::new(Settings::from_file(path.clone()));
        ws.open_text("doc", "function");
        let mut bus = EventBus::new();
        let engine = EmphasisEngine::new(ws.settings.config.keyword_filter());
        bus.subscribe(Box::new(EmphasisAdapter::new(engine, Style::bold())));
        bus.publish(&HostEvent::ActiveViewChanged, &mut ws);
        assert_eq!(ws.views()[0].emphasis().len(), 4);

        std::thread::sleep(std::time::Duration::from_millis(20));
        fs::write(&path, "[bionic-reading]\nexcluded-keywords = [\"function\"]\n").unwrap();
        assert!(ws.settings.reload_if_changed());
        bus.publish(&HostEvent::settings(), &mut ws);
        assert!(ws.views()[0].emphasis().is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_settings_reload() {
        let path = std::env::temp_dir().join(format!("bionic-settings-{}.toml", std::process::id()));
        let _ = fs::remove_file(&path);

        let mut settings = Settings::from_file(path.clone());
        assert_eq!(settings.config, Config::default());
        assert!(!settings.reload_if_changed());

        fs::write(&path, "[bionic-reading]\nenabled = false\n").unwrap();
        assert!(settings.reload_if_changed());
        assert!(!settings.config.enabled);

        fs::remove_file(&path).unwrap();
        assert!(settings.reload_if_changed());
        assert!(settings.config.enabled);
    }
}
