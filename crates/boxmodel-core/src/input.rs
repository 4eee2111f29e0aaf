//! Edge detection for the two modifier triggers and Ctrl navigation remaps.

use boxmodel_types::{Key, KeyEvent, KeyEventKind, ModifierKey};
use tracing::debug;

/// Semantic trigger derived from a raw modifier key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    FallbackPressed,
    FallbackReleased,
    ActionsPressed,
    ActionsReleased,
}

/// Tracks the held state of the fallback and actions modifiers.
///
/// Only real press/release pairs produce triggers: a press while the key is
/// already held (auto-repeat) and a release without a matching press are
/// both ignored.
#[derive(Debug, Clone)]
pub struct InputClassifier {
    mod_fallback: ModifierKey,
    mod_actions: ModifierKey,
    fallback_held: bool,
    actions_held: bool,
}

impl InputClassifier {
    pub fn new(mod_fallback: ModifierKey, mod_actions: ModifierKey) -> Self {
        Self {
            mod_fallback,
            mod_actions,
            fallback_held: false,
            actions_held: false,
        }
    }

    pub fn classify(&mut self, event: &KeyEvent) -> Option<Trigger> {
        let Key::Modifier(key) = event.key else {
            return None;
        };

        let (held, pressed, released) = if key == self.mod_fallback {
            (
                &mut self.fallback_held,
                Trigger::FallbackPressed,
                Trigger::FallbackReleased,
            )
        } else if key == self.mod_actions {
            (
                &mut self.actions_held,
                Trigger::ActionsPressed,
                Trigger::ActionsReleased,
            )
        } else {
            return None;
        };

        match event.kind {
            KeyEventKind::Press if event.repeat || *held => None,
            KeyEventKind::Press => {
                *held = true;
                Some(pressed)
            }
            KeyEventKind::Release if *held => {
                *held = false;
                Some(released)
            }
            KeyEventKind::Release => {
                debug!("Unpaired {key} release ignored");
                None
            }
        }
    }

    /// Forget held modifiers, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.fallback_held = false;
        self.actions_held = false;
    }
}

/// Map the Emacs/Vim style Ctrl bindings onto plain navigation keys.
pub fn normalize(event: KeyEvent) -> KeyEvent {
    if !event.modifiers.control {
        return event;
    }
    let key = match event.key {
        Key::Char('p' | 'k') => Key::Up,
        Key::Char('n' | 'j') => Key::Down,
        Key::Char('h') => Key::Left,
        Key::Char('l') => Key::Right,
        _ => return event,
    };
    KeyEvent {
        key,
        modifiers: event.modifiers.without(ModifierKey::Control),
        ..event
    }
}
