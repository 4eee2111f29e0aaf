use crate::query::{Generation, Query, QuerySource, Signal};
use tracing::debug;

/// Owns the retained queries and decides which one is current.
///
/// Replacing the current query cancels the old one before the new one is
/// built, so at most one query is ever wired to the presentation machine.
/// Signals are tagged with the generation of the query that raised them and
/// only the current generation gets through.
pub struct QueryController<S: QuerySource> {
    source: S,
    queries: Vec<S::Query>,
    current: Option<Generation>,
    displayed: Option<Generation>,
    next_generation: Generation,
}

impl<S: QuerySource> QueryController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            queries: Vec::new(),
            current: None,
            displayed: None,
            next_generation: 1,
        }
    }

    /// Cancel the current query and start a new one for `text`.
    pub fn replace(&mut self, text: &str) -> Generation {
        if let Some(current) = self.current_mut() {
            current.cancel();
        }

        let generation = self.next_generation;
        self.next_generation += 1;

        let query = self.source.query(text, generation);
        self.queries.push(query);
        self.current = Some(generation);
        debug!("Query {generation} started for {text:?}");

        if let Some(query) = self.queries.last_mut() {
            query.run();
        }
        generation
    }

    /// Fold worker output into its query. Returns the raised signal only if
    /// the query is still current.
    pub fn deliver(
        &mut self,
        generation: Generation,
        update: <S::Query as Query>::Update,
    ) -> Option<Signal> {
        let Some(query) = self.get_mut(generation) else {
            debug!("Dropping update for released query {generation}");
            return None;
        };
        let signal = query.integrate(update)?;

        if self.current != Some(generation) {
            debug!("Dropping stale {signal:?} from query {generation}");
            return None;
        }
        Some(signal)
    }

    pub fn current(&self) -> Option<&S::Query> {
        self.current.and_then(|g| self.get(g))
    }

    pub fn current_mut(&mut self) -> Option<&mut S::Query> {
        let generation = self.current?;
        self.get_mut(generation)
    }

    pub fn current_generation(&self) -> Option<Generation> {
        self.current
    }

    pub fn displayed(&self) -> Option<&S::Query> {
        self.displayed.and_then(|g| self.get(g))
    }

    pub fn displayed_generation(&self) -> Option<Generation> {
        self.displayed
    }

    /// The displayed query catches up with the current one
    pub fn commit_displayed(&mut self) {
        self.displayed = self.current;
    }

    pub fn get(&self, generation: Generation) -> Option<&S::Query> {
        self.queries.iter().find(|q| q.generation() == generation)
    }

    fn get_mut(&mut self, generation: Generation) -> Option<&mut S::Query> {
        self.queries.iter_mut().find(|q| q.generation() == generation)
    }

    /// Release every query except current, displayed and `bound`.
    pub fn trim(&mut self, bound: Option<Generation>) {
        let keep = [self.current, self.displayed, bound];
        let before = self.queries.len();
        self.queries
            .retain(|q| keep.contains(&Some(q.generation())));
        debug!("Trimmed retained queries {before} -> {}", self.queries.len());
    }

    pub fn retained(&self) -> impl Iterator<Item = Generation> + '_ {
        self.queries.iter().map(Query::generation)
    }
}
