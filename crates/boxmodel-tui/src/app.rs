//! Terminal state around the launcher core: the input cursor, the screen
//! areas of the last frame and pointer tracking.

use crate::keys;
use boxmodel_core::engine::QueryEngine;
use boxmodel_core::{KeyOutcome, Launcher};
use boxmodel_types::{Key, KeyEvent, Modifiers};
use crossterm::event::{self as ct, KeyCode, MouseButton, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::ListState;
use std::time::Instant;
use tracing::debug;

/// Where the last frame put each part of the window
#[derive(Debug, Clone, Copy, Default)]
pub struct Areas {
    pub input: Rect,
    pub button: Rect,
    pub results: Rect,
}

pub struct App {
    pub launcher: Launcher<QueryEngine>,

    /// Cursor position in the input line, in chars
    pub cursor: usize,

    /// Input text the cursor was last placed in
    synced_text: String,

    pub list_state: ListState,
    pub areas: Areas,
    over_button: bool,
}

impl App {
    pub fn new(launcher: Launcher<QueryEngine>) -> Self {
        let mut app = Self {
            launcher,
            cursor: 0,
            synced_text: String::new(),
            list_state: ListState::default(),
            areas: Areas::default(),
            over_button: false,
        };
        app.sync_cursor();
        app
    }

    pub fn handle_key(&mut self, key: &ct::KeyEvent) {
        let event = keys::to_key_event(key);
        debug!("KEY EVENT: {:?} -> {:?}", key, event);

        if event.is_press() && event.key == Key::Char('c') && event.modifiers == Modifiers::CONTROL {
            self.launcher.set_visible(false);
            return;
        }

        if let KeyOutcome::Forward(event) = self.launcher.key_event(event) {
            self.edit(&event, key.code);
        }
        self.sync_cursor();
    }

    pub fn paste(&mut self, pasted: &str) {
        let mut text = self.launcher.input().to_string();
        let select_all = self.launcher.view().input.select_all;
        for c in pasted.chars().filter(|c| !c.is_control()) {
            let event = KeyEvent::press(Key::Char(c), Modifiers::NONE);
            edit_line(&mut text, &mut self.cursor, &event, KeyCode::Null, select_all);
        }
        self.commit_text(text);
    }

    pub fn handle_mouse(&mut self, mouse: ct::MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => self.pointer_moved(position),
            MouseEventKind::Down(MouseButton::Left) => {
                self.pointer_moved(position);
                if self.areas.button.contains(position) {
                    self.launcher.open_settings();
                } else if let Some(row) = self.row_at(position) {
                    self.launcher
                        .activate(row, 0, keys::to_modifiers(mouse.modifiers));
                    self.sync_cursor();
                }
            }
            _ => {}
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.launcher.tick(now);
    }

    /// Result row under `position`, if the list is shown and accepts input
    fn row_at(&self, position: Position) -> Option<usize> {
        let view = &self.launcher.view().results;
        if !view.visible || !view.enabled {
            return None;
        }
        let area = self.areas.results;
        let inner_top = area.y.saturating_add(1);
        let inner_bottom = area.bottom().saturating_sub(1);
        if !area.contains(position) || position.y < inner_top || position.y >= inner_bottom {
            return None;
        }
        let row = self.list_state.offset() + usize::from(position.y - inner_top);
        (row < self.launcher.results().len()).then_some(row)
    }

    fn pointer_moved(&mut self, position: Position) {
        let over_button = self.areas.button.contains(position);
        if over_button != self.over_button {
            self.over_button = over_button;
            if over_button {
                self.launcher.pointer_entered_button();
            } else {
                self.launcher.pointer_left_button();
            }
        }
        self.launcher
            .set_pointer_over_input(self.areas.input.contains(position));
    }

    fn edit(&mut self, event: &KeyEvent, code: KeyCode) {
        let mut text = self.launcher.input().to_string();
        let select_all = self.launcher.view().input.select_all;
        edit_line(&mut text, &mut self.cursor, event, code, select_all);
        self.commit_text(text);
    }

    fn commit_text(&mut self, text: String) {
        if text != self.launcher.input() {
            self.launcher.text_edited(&text);
        }
        self.synced_text = text;
    }

    /// Move the cursor to the end when the launcher replaced the text
    fn sync_cursor(&mut self) {
        let text = self.launcher.input();
        if text != self.synced_text {
            self.cursor = text.chars().count();
            text.clone_into(&mut self.synced_text);
        }
    }
}

fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices().nth(cursor).map_or(text.len(), |(i, _)| i)
}

/// Apply a line-editing key to `text`. Returns whether it was an edit key.
///
/// `code` is the untranslated terminal key, for keys the launcher does not
/// model (Delete, Home, End).
fn edit_line(
    text: &mut String,
    cursor: &mut usize,
    event: &KeyEvent,
    code: KeyCode,
    select_all: bool,
) -> bool {
    let mods = event.modifiers;
    let len = text.chars().count();
    *cursor = (*cursor).min(len);

    match event.key {
        Key::Char(c) if !mods.control && !mods.alt && !mods.meta => {
            if select_all {
                text.clear();
                *cursor = 0;
            }
            text.insert(byte_index(text, *cursor), c);
            *cursor += 1;
        }
        Key::Char('u') if mods == Modifiers::CONTROL => {
            text.drain(..byte_index(text, *cursor));
            *cursor = 0;
        }
        Key::Char('w') if mods == Modifiers::CONTROL => {
            let end = byte_index(text, *cursor);
            let trimmed = text[..end].trim_end();
            let start = trimmed
                .rfind(char::is_whitespace)
                .map_or(0, |i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8));
            *cursor -= text[start..end].chars().count();
            text.drain(start..end);
        }
        Key::Backspace if select_all => {
            text.clear();
            *cursor = 0;
        }
        Key::Backspace if *cursor > 0 => {
            *cursor -= 1;
            text.remove(byte_index(text, *cursor));
        }
        Key::Left => *cursor = cursor.saturating_sub(1),
        Key::Right => *cursor = (*cursor + 1).min(len),
        Key::Other => match code {
            KeyCode::Delete if *cursor < len => {
                text.remove(byte_index(text, *cursor));
            }
            KeyCode::Home => *cursor = 0,
            KeyCode::End => *cursor = len,
            _ => return false,
        },
        _ => return false,
    }
    true
}
