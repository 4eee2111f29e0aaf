//! Presentation core of the boxmodel launcher window.
//!
//! The core decides *when* already-computed result sets become visible and
//! *how* user input interacts with in-flight asynchronous queries. It owns
//! no widgets: frontends feed it input events and query updates, then render
//! the [`View`] it maintains.

pub mod config;
pub mod engine;
pub mod machine;

mod controller;
mod error;
mod history;
mod input;
mod launcher;
mod query;
mod timer;
mod view;

#[cfg(test)]
mod tests;

pub use controller::QueryController;
pub use error::{Error, Result};
pub use history::History;
pub use input::{InputClassifier, Trigger};
pub use launcher::{KeyOutcome, Launcher};
pub use machine::{Effect, Event, Model, PresentationMachine, PresentationState, Snapshot};
pub use query::{Generation, Query, QuerySource, Signal};
pub use timer::DebounceTimer;
pub use view::{ActionsView, Binding, Fade, FadeDirection, InputLine, KeyRouting, ListView, View};

pub use boxmodel_types::*;
