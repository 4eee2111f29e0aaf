//! Shared types for boxmodel launcher components.
//!
//! This crate provides the types used by both boxmodel-core and the
//! frontends: result rows, their actions, and the toolkit-neutral key
//! events the core consumes.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deserialize a Vec that may be null or missing (both become empty vec)
fn deserialize_null_as_empty_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// A single row in the results or fallbacks list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub id: String,

    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,

    /// Text the input line is replaced with on completion (Tab)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<String>,

    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub actions: Vec<Action>,
}

impl ResultItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_subtext(mut self, subtext: impl Into<String>) -> Self {
        self.subtext = Some(subtext.into());
        self
    }

    #[must_use]
    pub fn with_completion(mut self, completion: impl Into<String>) -> Self {
        self.completion = Some(completion.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.actions.push(Action {
            id: id.into(),
            text: text.into(),
        });
        self
    }

    /// Completion text, if the item offers a non-empty one
    pub fn completion(&self) -> Option<&str> {
        self.completion.as_deref().filter(|c| !c.is_empty())
    }
}

/// Secondary action offered by a result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub text: String,
}

/// Modifier keys that can be bound to the fallback and actions triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    Shift,
    #[serde(alias = "super", alias = "cmd")]
    Meta,
    #[serde(alias = "ctrl")]
    Control,
    #[serde(alias = "option")]
    Alt,
}

impl ModifierKey {
    pub const ALL: [ModifierKey; 4] = [Self::Shift, Self::Meta, Self::Control, Self::Alt];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shift => "shift",
            Self::Meta => "meta",
            Self::Control => "control",
            Self::Alt => "alt",
        }
    }
}

impl fmt::Display for ModifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModifier(pub String);

impl fmt::Display for UnknownModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown modifier key: {}", self.0)
    }
}

impl std::error::Error for UnknownModifier {}

impl FromStr for ModifierKey {
    type Err = UnknownModifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shift" => Ok(Self::Shift),
            "meta" | "super" | "cmd" => Ok(Self::Meta),
            "control" | "ctrl" => Ok(Self::Control),
            "alt" | "option" => Ok(Self::Alt),
            other => Err(UnknownModifier(other.to_string())),
        }
    }
}

/// Set of modifiers held while a key event was produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)] // one flag per physical modifier
pub struct Modifiers {
    pub shift: bool,
    pub meta: bool,
    pub control: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        meta: false,
        control: false,
        alt: false,
    };

    pub const CONTROL: Self = Self {
        control: true,
        ..Self::NONE
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    pub fn contains(self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::Shift => self.shift,
            ModifierKey::Meta => self.meta,
            ModifierKey::Control => self.control,
            ModifierKey::Alt => self.alt,
        }
    }

    #[must_use]
    pub fn with(self, key: ModifierKey) -> Self {
        self.set(key, true)
    }

    #[must_use]
    pub fn without(self, key: ModifierKey) -> Self {
        self.set(key, false)
    }

    #[must_use]
    fn set(mut self, key: ModifierKey, value: bool) -> Self {
        match key {
            ModifierKey::Shift => self.shift = value,
            ModifierKey::Meta => self.meta = value,
            ModifierKey::Control => self.control = value,
            ModifierKey::Alt => self.alt = value,
        }
        self
    }

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

/// Toolkit-neutral key identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Modifier(ModifierKey),
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Tab,
    Enter,
    Escape,
    Backspace,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    Press,
    Release,
}

/// A raw key event as delivered by the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
    /// Synthesized by keyboard auto-repeat
    pub repeat: bool,
}

impl KeyEvent {
    pub fn press(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            kind: KeyEventKind::Press,
            repeat: false,
        }
    }

    pub fn release(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            kind: KeyEventKind::Release,
            repeat: false,
        }
    }

    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }

    pub fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }
}
