//! Conversion from crossterm key events to launcher key events.

use boxmodel_types::{Key, KeyEvent, KeyEventKind, ModifierKey, Modifiers};
use crossterm::event::{self as ct, KeyCode, KeyModifiers, ModifierKeyCode};

pub fn to_key_event(event: &ct::KeyEvent) -> KeyEvent {
    let mut modifiers = to_modifiers(event.modifiers);
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Modifier(code) => modifier_key(code).map_or(Key::Other, Key::Modifier),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => {
            modifiers.shift = true;
            Key::Tab
        }
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        _ => Key::Other,
    };

    let (kind, repeat) = match event.kind {
        ct::KeyEventKind::Press => (KeyEventKind::Press, false),
        ct::KeyEventKind::Repeat => (KeyEventKind::Press, true),
        ct::KeyEventKind::Release => (KeyEventKind::Release, false),
    };

    KeyEvent {
        key,
        modifiers,
        kind,
        repeat,
    }
}

pub fn to_modifiers(modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: modifiers.contains(KeyModifiers::SHIFT),
        meta: modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META | KeyModifiers::HYPER),
        control: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
    }
}

fn modifier_key(code: ModifierKeyCode) -> Option<ModifierKey> {
    match code {
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => Some(ModifierKey::Shift),
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => {
            Some(ModifierKey::Control)
        }
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => Some(ModifierKey::Alt),
        ModifierKeyCode::LeftSuper
        | ModifierKeyCode::RightSuper
        | ModifierKeyCode::LeftMeta
        | ModifierKeyCode::RightMeta
        | ModifierKeyCode::LeftHyper
        | ModifierKeyCode::RightHyper => Some(ModifierKey::Meta),
        ModifierKeyCode::IsoLevel3Shift | ModifierKeyCode::IsoLevel5Shift => None,
    }
}
