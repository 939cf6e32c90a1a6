//! Bionic reading for source text
//!
//! The [`emphasis`] module holds the engine: a pure function from text and
//! configuration to the characters that should be emphasized. The rest of
//! the crate is a terminal host for it: documents, settings, an event bus
//! that triggers recomputation, and the reader UI.

pub mod adapter;
pub mod config;
pub mod display;
pub mod emphasis;
pub mod error;
pub mod input;
pub mod style;
pub mod terminal;
pub mod view;
pub mod viewer;
pub mod workspace;

pub use adapter::{EmphasisAdapter, EventBus, Host, HostEvent, HostListener, TextView, ViewId};
pub use config::{Config, NAMESPACE};
pub use emphasis::{emphasize, Configuration, EmphasisEngine, EmphasisRange};
pub use error::{BionicError, Result};
pub use style::Style;
