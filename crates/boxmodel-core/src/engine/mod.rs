//! Asynchronous query engine.
//!
//! Every query runs its handlers on tokio's blocking pool. Match batches
//! stream back over an unbounded channel as [`EngineMessage`]s tagged with
//! the query's generation. Once all handlers returned (or panicked) a
//! single [`Update::Finished`] follows. The owner of the receiver hands each
//! message to [`crate::Launcher::on_query_update`].

mod query;

pub use query::TaskQuery;

use crate::query::{Generation, QuerySource};
use boxmodel_types::ResultItem;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// Produces matches and fallbacks for query strings
pub trait Handler: Send + Sync {
    fn id(&self) -> &str;

    /// Stream matches for `query` into `sink`. Runs on a blocking worker;
    /// long-running handlers should poll [`MatchSink::is_canceled`].
    fn handle(&self, query: &str, sink: &MatchSink);

    /// Rows offered when nothing matches. Computed when the query is created.
    fn fallbacks(&self, _query: &str) -> Vec<ResultItem> {
        Vec::new()
    }

    /// Run `action` of `item`; action 0 is the default
    fn activate(&self, item: &ResultItem, action: usize);
}

/// Worker output for one query
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Matches { handler: usize, items: Vec<ResultItem> },
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineMessage {
    pub generation: Generation,
    pub update: Update,
}

/// Where a handler delivers its matches
#[derive(Debug, Clone)]
pub struct MatchSink {
    generation: Generation,
    handler: usize,
    canceled: Arc<AtomicBool>,
    tx: UnboundedSender<EngineMessage>,
}

impl MatchSink {
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Relaxed)
    }

    /// Send a batch of matches. Returns `false` once the query is canceled
    /// or nobody listens anymore.
    pub fn add(&self, items: Vec<ResultItem>) -> bool {
        if self.is_canceled() {
            return false;
        }
        if items.is_empty() {
            return true;
        }
        self.tx
            .send(EngineMessage {
                generation: self.generation,
                update: Update::Matches {
                    handler: self.handler,
                    items,
                },
            })
            .is_ok()
    }
}

/// [`QuerySource`] running a fixed set of handlers
pub struct QueryEngine {
    runtime: Handle,
    handlers: Arc<[Arc<dyn Handler>]>,
    synopsis: String,
    tx: UnboundedSender<EngineMessage>,
}

impl QueryEngine {
    pub fn new(
        runtime: Handle,
        handlers: Vec<Arc<dyn Handler>>,
        synopsis: impl Into<String>,
    ) -> (Self, UnboundedReceiver<EngineMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        debug!("Query engine with {} handlers", handlers.len());
        let engine = Self {
            runtime,
            handlers: handlers.into(),
            synopsis: synopsis.into(),
            tx,
        };
        (engine, rx)
    }
}

impl QuerySource for QueryEngine {
    type Query = TaskQuery;

    fn query(&mut self, string: &str, generation: Generation) -> TaskQuery {
        TaskQuery::new(
            generation,
            string,
            &self.synopsis,
            self.runtime.clone(),
            Arc::clone(&self.handlers),
            self.tx.clone(),
        )
    }
}
