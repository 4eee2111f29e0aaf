//! Key handling.
//!
//! Presses are offered to the actions list (while routed), the launcher's
//! own bindings, then the results list (while routed). Whatever nobody
//! consumes goes back to the frontend's text input.

use super::Launcher;
use crate::input::{Trigger, normalize};
use crate::machine::{Event, Model};
use crate::query::QuerySource;
use boxmodel_types::{Key, KeyEvent, Modifiers};
use tracing::debug;

/// What the frontend should do with a key event after the launcher saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Consumed,
    /// Not a press; nothing left to do
    Ignored,
    /// Let the text input handle this (possibly remapped) event
    Forward(KeyEvent),
}

impl<S: QuerySource> Launcher<S> {
    pub fn key_event(&mut self, event: KeyEvent) -> KeyOutcome {
        if let Some(trigger) = self.classifier.classify(&event) {
            self.dispatch(match trigger {
                Trigger::FallbackPressed => Event::FallbackPressed,
                Trigger::FallbackReleased => Event::FallbackReleased,
                Trigger::ActionsPressed => Event::ActionsPressed,
                Trigger::ActionsReleased => Event::ActionsReleased,
            });
        }

        if !event.is_press() {
            return KeyOutcome::Ignored;
        }
        let event = normalize(event);

        if self.view.routing.actions && self.actions_key(&event) {
            return KeyOutcome::Consumed;
        }
        if self.launcher_key(&event) {
            return KeyOutcome::Consumed;
        }
        if self.view.routing.results && self.view.results.enabled && self.results_key(&event) {
            return KeyOutcome::Consumed;
        }
        KeyOutcome::Forward(event)
    }

    fn launcher_key(&mut self, event: &KeyEvent) -> bool {
        let mods = event.modifiers;
        match event.key {
            Key::Tab => {
                let completion = self.selected_row().and_then(|row| {
                    self.results()
                        .get(row)
                        .and_then(|item| item.completion().map(str::to_owned))
                });
                if let Some(completion) = completion {
                    self.set_input(&completion);
                }
                true
            }
            Key::Up => {
                let selected = self.selected_row();
                if selected.is_none() || mods.shift || (selected == Some(0) && !event.repeat) {
                    self.history_older();
                    true
                } else {
                    false
                }
            }
            Key::Down if mods.shift => {
                self.history_newer();
                true
            }
            Key::Char(',') if mods == Modifiers::CONTROL || mods == Modifiers::ALT => {
                self.open_settings();
                true
            }
            Key::Escape => {
                self.set_visible(false);
                true
            }
            _ => false,
        }
    }

    fn results_key(&mut self, event: &KeyEvent) -> bool {
        let len = self.results().len();
        let page = page_size(self.config.item_count);
        let delta = match event.key {
            Key::Up => -1,
            Key::Down => 1,
            Key::PageUp => -page,
            Key::PageDown => page,
            Key::Enter => {
                if let Some(row) = self.view.results.current {
                    self.activate(row, 0, event.modifiers);
                }
                return true;
            }
            _ => return false,
        };

        self.view.results.step(delta, len);
        if self.state().results.model() == Some(Model::Matches) {
            self.view.input.hint = super::completion_hint(self.results(), self.view.results.current);
        }
        true
    }

    fn actions_key(&mut self, event: &KeyEvent) -> bool {
        let page = page_size(self.config.item_count);
        let delta = match event.key {
            Key::Up => -1,
            Key::Down => 1,
            Key::PageUp => -page,
            Key::PageDown => page,
            Key::Enter => {
                if let (Some(row), Some(action)) =
                    (self.view.results.current, self.view.actions.current)
                {
                    self.activate(row, action, event.modifiers);
                }
                return true;
            }
            _ => return false,
        };

        self.view.actions.step(delta);
        true
    }

    fn history_search_text(&self) -> String {
        if self.config.history_search {
            self.user_text.clone()
        } else {
            String::new()
        }
    }

    fn history_older(&mut self) {
        let needle = self.history_search_text();
        let mut next = self.history.next(&needle).map(str::to_owned);

        // Without clearOnHide the newest entry is usually the text itself
        if next.as_deref() == Some(self.view.input.text.as_str()) {
            next = self.history.next(&needle).map(str::to_owned);
        }

        match next {
            Some(text) => self.set_input(&text),
            None => debug!("History exhausted"),
        }
    }

    fn history_newer(&mut self) {
        let needle = self.history_search_text();
        if let Some(text) = self.history.prev(&needle).map(str::to_owned) {
            self.set_input(&text);
        }
    }
}

fn page_size(item_count: usize) -> isize {
    isize::try_from(item_count.max(1)).unwrap_or(isize::MAX)
}
