//! View model owned by the launcher and rendered by frontends.

use crate::query::Generation;
use crate::machine::Model;
use boxmodel_types::Action;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    pub text: String,
    /// Completion or synopsis shown after the text
    pub hint: String,
    /// Text is marked for replacement by the next keystroke
    pub select_all: bool,
}

/// Which query collection a list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub generation: Generation,
    pub model: Model,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub visible: bool,
    /// Frozen lists are drawn dimmed and ignore input
    pub enabled: bool,
    pub binding: Option<Binding>,
    pub current: Option<usize>,
}

impl ListView {
    /// Move the current row by `delta`, clamped to `len` rows.
    pub fn step(&mut self, delta: isize, len: usize) {
        self.current = step(self.current, delta, len);
    }

    /// Row `index` into the list, if the list has it
    pub fn select(&mut self, index: usize, len: usize) {
        self.current = (index < len).then_some(index);
    }
}

fn step(current: Option<usize>, delta: isize, len: usize) -> Option<usize> {
    let last = len.checked_sub(1)?;
    Some(current.unwrap_or(0).saturating_add_signed(delta).min(last))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionsView {
    pub visible: bool,
    pub items: Vec<Action>,
    pub current: Option<usize>,
}

impl ActionsView {
    pub fn step(&mut self, delta: isize) {
        self.current = step(self.current, delta, self.items.len());
    }
}

/// Views that get first refusal on navigation keys, actions before results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyRouting {
    pub results: bool,
    pub actions: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FadeDirection {
    Forward,
    #[default]
    Backward,
}

/// Opacity animation of the settings button
#[derive(Debug, Clone, PartialEq)]
pub struct Fade {
    direction: FadeDirection,
    from: f32,
    started: Option<Instant>,
    duration: Duration,
}

impl Fade {
    pub fn new(duration: Duration) -> Self {
        Self {
            direction: FadeDirection::Backward,
            from: 0.0,
            started: None,
            duration,
        }
    }

    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    /// Start fading towards `direction` from the current opacity
    pub fn start(&mut self, direction: FadeDirection, now: Instant) {
        self.from = self.opacity(now);
        self.direction = direction;
        self.started = Some(now);
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        let target = match self.direction {
            FadeDirection::Forward => 1.0,
            FadeDirection::Backward => 0.0,
        };
        let Some(started) = self.started else {
            return target;
        };
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (now.saturating_duration_since(started).as_secs_f32() / self.duration.as_secs_f32())
                .min(1.0)
        };
        self.from + (target - self.from) * ease_in_out_quad(t)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.started
            .is_some_and(|started| now.saturating_duration_since(started) < self.duration)
    }
}

fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Everything a frontend draws
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub input: InputLine,
    pub results: ListView,
    pub actions: ActionsView,
    pub button: Fade,
    pub routing: KeyRouting,
}

impl View {
    pub fn new(button_fade: Duration) -> Self {
        Self {
            input: InputLine::default(),
            results: ListView {
                enabled: true,
                ..ListView::default()
            },
            actions: ActionsView::default(),
            button: Fade::new(button_fade),
            routing: KeyRouting::default(),
        }
    }
}
