//! The query collaborator consumed by the presentation core.

use crate::machine::Model;
use boxmodel_types::{Action, ResultItem};

/// Monotonic tag assigned to each query by the controller
pub type Generation = u64;

/// Notification a query raises while it is integrated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// New matches were appended
    ResultsReady,
    /// Terminal; raised at most once per query
    Finished,
}

/// One asynchronous search request.
///
/// The work itself happens elsewhere (a worker task, a test fixture). The
/// owner folds the worker's output back in through [`Query::integrate`],
/// which reports the signal the update raises.
pub trait Query {
    /// Worker output for this query
    type Update;

    fn generation(&self) -> Generation;

    fn string(&self) -> &str;

    /// Hint shown in the input line while it is empty
    fn synopsis(&self) -> &str;

    fn is_finished(&self) -> bool;

    fn run(&mut self);

    /// Stop producing matches. Calling it twice is harmless. A canceled
    /// query may still finish.
    fn cancel(&mut self);

    fn matches(&self) -> &[ResultItem];

    /// Fixed when the query is created
    fn fallbacks(&self) -> &[ResultItem];

    fn match_actions(&self, row: usize) -> &[Action] {
        self.matches()
            .get(row)
            .map_or(&[], |item| item.actions.as_slice())
    }

    fn fallback_actions(&self, row: usize) -> &[Action] {
        self.fallbacks()
            .get(row)
            .map_or(&[], |item| item.actions.as_slice())
    }

    /// Activate `row`; action 0 is the item's default activation.
    fn activate_match(&self, row: usize, action: usize);

    fn activate_fallback(&self, row: usize, action: usize);

    fn integrate(&mut self, update: Self::Update) -> Option<Signal>;

    fn model(&self, model: Model) -> &[ResultItem] {
        match model {
            Model::Matches => self.matches(),
            Model::Fallbacks => self.fallbacks(),
        }
    }

    fn actions(&self, model: Model, row: usize) -> &[Action] {
        match model {
            Model::Matches => self.match_actions(row),
            Model::Fallbacks => self.fallback_actions(row),
        }
    }

    fn activate(&self, model: Model, row: usize, action: usize) {
        match model {
            Model::Matches => self.activate_match(row, action),
            Model::Fallbacks => self.activate_fallback(row, action),
        }
    }
}

/// Factory for queries, one per input text
pub trait QuerySource {
    type Query: Query;

    fn query(&mut self, string: &str, generation: Generation) -> Self::Query;
}
