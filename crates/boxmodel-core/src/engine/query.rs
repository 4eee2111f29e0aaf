use super::{EngineMessage, Handler, MatchSink, Update};
use crate::query::{Generation, Query, Signal};
use boxmodel_types::ResultItem;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

/// A query whose handlers run on the blocking pool
pub struct TaskQuery {
    generation: Generation,
    string: String,
    synopsis: String,
    runtime: Handle,
    handlers: Arc<[Arc<dyn Handler>]>,
    tx: UnboundedSender<EngineMessage>,
    canceled: Arc<AtomicBool>,
    started: bool,
    finished: bool,

    /// Rows and the index of the handler that produced each
    matches: Vec<ResultItem>,
    match_owners: Vec<usize>,
    fallbacks: Vec<ResultItem>,
    fallback_owners: Vec<usize>,
}

impl TaskQuery {
    pub(super) fn new(
        generation: Generation,
        string: &str,
        synopsis: &str,
        runtime: Handle,
        handlers: Arc<[Arc<dyn Handler>]>,
        tx: UnboundedSender<EngineMessage>,
    ) -> Self {
        let mut fallbacks = Vec::new();
        let mut fallback_owners = Vec::new();
        for (index, handler) in handlers.iter().enumerate() {
            let items = handler.fallbacks(string);
            fallback_owners.extend(std::iter::repeat_n(index, items.len()));
            fallbacks.extend(items);
        }

        Self {
            generation,
            string: string.to_string(),
            synopsis: synopsis.to_string(),
            runtime,
            handlers,
            tx,
            canceled: Arc::new(AtomicBool::new(false)),
            started: false,
            finished: false,
            matches: Vec::new(),
            match_owners: Vec::new(),
            fallbacks,
            fallback_owners,
        }
    }

    fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Relaxed)
    }

    fn activate_in(
        &self,
        rows: &[ResultItem],
        owners: &[usize],
        row: usize,
        action: usize,
    ) {
        let (Some(item), Some(&owner)) = (rows.get(row), owners.get(row)) else {
            warn!("Query {}: no row {row} to activate", self.generation);
            return;
        };
        if let Some(handler) = self.handlers.get(owner) {
            handler.activate(item, action);
        }
    }
}

impl Query for TaskQuery {
    type Update = Update;

    fn generation(&self) -> Generation {
        self.generation
    }

    fn string(&self) -> &str {
        &self.string
    }

    fn synopsis(&self) -> &str {
        &self.synopsis
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn run(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        let generation = self.generation;
        let string = self.string.clone();
        let handlers = Arc::clone(&self.handlers);
        let canceled = Arc::clone(&self.canceled);
        let tx = self.tx.clone();

        self.runtime.spawn(async move {
            let workers: Vec<_> = handlers
                .iter()
                .enumerate()
                .map(|(index, handler)| {
                    let handler = Arc::clone(handler);
                    let string = string.clone();
                    let sink = MatchSink {
                        generation,
                        handler: index,
                        canceled: Arc::clone(&canceled),
                        tx: tx.clone(),
                    };
                    tokio::task::spawn_blocking(move || handler.handle(&string, &sink))
                })
                .collect();

            for (worker, handler) in workers.into_iter().zip(handlers.iter()) {
                if let Err(e) = worker.await {
                    warn!("Handler {} failed on query {generation}: {e}", handler.id());
                }
            }

            // A closed channel means the launcher is gone
            let _ = tx.send(EngineMessage {
                generation,
                update: Update::Finished,
            });
        });
    }

    fn cancel(&mut self) {
        if !self.canceled.swap(true, Ordering::Relaxed) {
            debug!("Query {} canceled", self.generation);
        }
    }

    fn matches(&self) -> &[ResultItem] {
        &self.matches
    }

    fn fallbacks(&self) -> &[ResultItem] {
        &self.fallbacks
    }

    fn activate_match(&self, row: usize, action: usize) {
        self.activate_in(&self.matches, &self.match_owners, row, action);
    }

    fn activate_fallback(&self, row: usize, action: usize) {
        self.activate_in(&self.fallbacks, &self.fallback_owners, row, action);
    }

    fn integrate(&mut self, update: Update) -> Option<Signal> {
        match update {
            Update::Matches { handler, items } => {
                if self.is_canceled() || self.finished || items.is_empty() {
                    return None;
                }
                self.match_owners
                    .extend(std::iter::repeat_n(handler, items.len()));
                self.matches.extend(items);
                Some(Signal::ResultsReady)
            }
            Update::Finished => {
                if self.finished {
                    return None;
                }
                self.finished = true;
                Some(Signal::Finished)
            }
        }
    }
}

impl Drop for TaskQuery {
    fn drop(&mut self) {
        self.cancel();
    }
}
