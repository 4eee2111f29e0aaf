//! Test fixtures and helpers

use crate::config::WindowConfig;
use crate::query::{Generation, Query, QuerySource, Signal};
use crate::{Key, KeyEvent, Launcher, ModifierKey, Modifiers, ResultItem};
use std::cell::RefCell;
use std::rc::Rc;

pub const SYNOPSIS: &str = "Type to search";

/// Calls the fake queries received from the launcher
#[derive(Debug, Default)]
pub struct Log {
    pub ran: Vec<Generation>,
    pub canceled: Vec<Generation>,
    /// (generation, collection, row, action)
    pub activations: Vec<(Generation, &'static str, usize, usize)>,
}

pub type SharedLog = Rc<RefCell<Log>>;

/// Worker output fed to a [`FakeQuery`] by the test
#[derive(Debug, Clone, PartialEq)]
pub enum FakeUpdate {
    Matches(Vec<ResultItem>),
    Finished,
}

pub struct FakeQuery {
    generation: Generation,
    string: String,
    matches: Vec<ResultItem>,
    fallbacks: Vec<ResultItem>,
    finished: bool,
    canceled: bool,
    log: SharedLog,
}

impl Query for FakeQuery {
    type Update = FakeUpdate;

    fn generation(&self) -> Generation {
        self.generation
    }

    fn string(&self) -> &str {
        &self.string
    }

    fn synopsis(&self) -> &str {
        SYNOPSIS
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn run(&mut self) {
        self.log.borrow_mut().ran.push(self.generation);
    }

    fn cancel(&mut self) {
        if !self.canceled {
            self.canceled = true;
            self.log.borrow_mut().canceled.push(self.generation);
        }
    }

    fn matches(&self) -> &[ResultItem] {
        &self.matches
    }

    fn fallbacks(&self) -> &[ResultItem] {
        &self.fallbacks
    }

    fn activate_match(&self, row: usize, action: usize) {
        self.log
            .borrow_mut()
            .activations
            .push((self.generation, "matches", row, action));
    }

    fn activate_fallback(&self, row: usize, action: usize) {
        self.log
            .borrow_mut()
            .activations
            .push((self.generation, "fallbacks", row, action));
    }

    fn integrate(&mut self, update: FakeUpdate) -> Option<Signal> {
        match update {
            FakeUpdate::Matches(items) => {
                if self.canceled || self.finished || items.is_empty() {
                    return None;
                }
                self.matches.extend(items);
                Some(Signal::ResultsReady)
            }
            FakeUpdate::Finished => {
                if self.finished {
                    return None;
                }
                self.finished = true;
                Some(Signal::Finished)
            }
        }
    }
}

/// Creates fake queries that all offer the same fallbacks
pub struct FakeSource {
    pub fallbacks: Vec<ResultItem>,
    pub log: SharedLog,
}

impl QuerySource for FakeSource {
    type Query = FakeQuery;

    fn query(&mut self, string: &str, generation: Generation) -> FakeQuery {
        FakeQuery {
            generation,
            string: string.to_string(),
            matches: Vec::new(),
            fallbacks: self.fallbacks.clone(),
            finished: false,
            canceled: false,
            log: Rc::clone(&self.log),
        }
    }
}

/// A source with `count` fallback rows
pub fn make_source(count: usize) -> (FakeSource, SharedLog) {
    let log = SharedLog::default();
    let fallbacks = (0..count)
        .map(|i| {
            make_item(&format!("fallback-{i}"), &format!("Search web {i}"))
                .with_action("open", "Open")
        })
        .collect();
    let source = FakeSource {
        fallbacks,
        log: Rc::clone(&log),
    };
    (source, log)
}

pub fn make_item(id: &str, text: &str) -> ResultItem {
    ResultItem::new(id, text)
}

/// A match row with a completion and two actions
pub fn make_match(text: &str) -> ResultItem {
    ResultItem::new(text, text)
        .with_completion(format!("{text} "))
        .with_action("run", "Run")
        .with_action("copy", "Copy")
}

pub fn window_config() -> WindowConfig {
    WindowConfig::default()
}

pub fn make_launcher(config: &WindowConfig, fallbacks: usize) -> (Launcher<FakeSource>, SharedLog) {
    let (source, log) = make_source(fallbacks);
    (Launcher::new(config, source), log)
}

/// A shown launcher with default config
pub fn shown_launcher(fallbacks: usize) -> (Launcher<FakeSource>, SharedLog) {
    let (mut launcher, log) = make_launcher(&window_config(), fallbacks);
    launcher.set_visible(true);
    (launcher, log)
}

/// Type `text` and return the generation of the query it started
pub fn type_text(launcher: &mut Launcher<FakeSource>, text: &str) -> Generation {
    launcher.text_edited(text);
    current_generation(launcher)
}

pub fn current_generation(launcher: &Launcher<FakeSource>) -> Generation {
    launcher
        .controller()
        .current_generation()
        .expect("a query is current")
}

/// Deliver matches to the current query
pub fn deliver_matches(launcher: &mut Launcher<FakeSource>, texts: &[&str]) {
    let generation = current_generation(launcher);
    let items = texts.iter().map(|t| make_match(t)).collect();
    launcher.on_query_update(generation, FakeUpdate::Matches(items));
}

pub fn finish(launcher: &mut Launcher<FakeSource>) {
    let generation = current_generation(launcher);
    launcher.on_query_update(generation, FakeUpdate::Finished);
}

pub fn press(key: Key) -> KeyEvent {
    KeyEvent::press(key, Modifiers::NONE)
}

pub fn press_modifier(key: ModifierKey) -> KeyEvent {
    KeyEvent::press(Key::Modifier(key), Modifiers::NONE.with(key))
}

pub fn release_modifier(key: ModifierKey) -> KeyEvent {
    KeyEvent::release(Key::Modifier(key), Modifiers::NONE)
}
