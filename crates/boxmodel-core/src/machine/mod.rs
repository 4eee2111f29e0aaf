//! Presentation state machine.
//!
//! Two parallel regions react to every [`Event`]:
//!
//! - **button**: the settings button fades in while the user types or
//!   hovers it, and out once the query is done.
//! - **results**: `Hidden`, `Postponed` (stale results frozen while the
//!   debounce timer runs) or `Visible` with a model and an actions
//!   sub-region.
//!
//! Transitions are pure functions of the current state, the event and a
//! read-only [`Snapshot`] of the current query. They return the new state
//! and the [`Effect`]s to apply, exit effects deepest-first followed by
//! entry effects outermost-first. The machine never touches the view.

mod state;

pub use state::{ActionsState, ButtonState, Model, PresentationState, ResultsState};

use crate::view::FadeDirection;
use tracing::debug;

/// Input to the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    TextChanged,
    ResultsReady,
    QueryFinished,
    DebounceTimeout,
    FallbackPressed,
    FallbackReleased,
    ActionsPressed,
    ActionsReleased,
    ButtonEntered,
    ButtonLeft,
}

/// What the guards may look at when an event is dispatched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Match rows of the current query
    pub matches: usize,
    /// Fallback rows of the current query
    pub fallbacks: usize,
    pub finished: bool,
    pub show_fallbacks_on_empty: bool,
    pub pointer_over_input: bool,
}

impl Snapshot {
    fn fallbacks_on_finish(&self) -> bool {
        self.show_fallbacks_on_empty && self.fallbacks > 0
    }
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    FadeButton(FadeDirection),
    HideResults,
    StartDebounce,
    FreezeResults,
    /// The displayed query catches up with the current one
    CommitDisplayed,
    ThawResults,
    /// Give the results view first refusal on navigation keys
    RouteResults,
    UnrouteResults,
    BindModel(Model),
    ShowActions(Model),
    HideActions,
}

#[derive(Debug, Clone, Default)]
pub struct PresentationMachine {
    state: PresentationState,
}

impl PresentationMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    /// Offer `event` to both regions and return the effects to apply.
    pub fn handle(&mut self, event: Event, snapshot: &Snapshot) -> Vec<Effect> {
        let (next, effects) = transition(self.state, event, snapshot);
        if next != self.state {
            debug!(
                "{event:?}: {:?} -> {:?}",
                self.state.active_leaves(),
                next.active_leaves()
            );
        }
        self.state = next;
        effects
    }
}

/// Pure transition function over both regions.
pub fn transition(
    state: PresentationState,
    event: Event,
    snapshot: &Snapshot,
) -> (PresentationState, Vec<Effect>) {
    let mut effects = Vec::new();

    let button = next_button(state.button, event, snapshot);
    if button != state.button {
        effects.push(Effect::FadeButton(match button {
            ButtonState::Shown => FadeDirection::Forward,
            ButtonState::Hidden => FadeDirection::Backward,
        }));
    }

    let results = next_results(state.results, event, snapshot);
    results_effects(state.results, results, &mut effects);

    (PresentationState { button, results }, effects)
}

fn next_button(state: ButtonState, event: Event, snapshot: &Snapshot) -> ButtonState {
    match (state, event) {
        (ButtonState::Hidden, Event::ButtonEntered | Event::TextChanged) => ButtonState::Shown,
        (ButtonState::Shown, Event::QueryFinished) if !snapshot.pointer_over_input => {
            ButtonState::Hidden
        }
        (ButtonState::Shown, Event::ButtonLeft) if snapshot.finished => ButtonState::Hidden,
        (state, _) => state,
    }
}

fn next_results(state: ResultsState, event: Event, snapshot: &Snapshot) -> ResultsState {
    use ResultsState::{Hidden, Postponed, Visible};

    match (state, event) {
        (Visible { .. }, Event::TextChanged) => Postponed,

        (Postponed, Event::DebounceTimeout) => Hidden,
        (Postponed, Event::QueryFinished) if !snapshot.fallbacks_on_finish() => Hidden,

        (Postponed | Hidden, Event::QueryFinished) if snapshot.fallbacks_on_finish() => {
            ResultsState::visible(Model::Fallbacks)
        }
        (Postponed | Hidden, Event::FallbackPressed) if snapshot.fallbacks > 0 => {
            ResultsState::visible(Model::Fallbacks)
        }
        (Postponed | Hidden, Event::ResultsReady) => ResultsState::visible(Model::Matches),

        (
            Visible {
                model: Model::Fallbacks,
                ..
            },
            Event::FallbackReleased,
        ) if snapshot.matches == 0 => Hidden,
        (
            Visible {
                model: Model::Fallbacks,
                actions,
            },
            Event::FallbackReleased,
        ) => Visible {
            model: Model::Matches,
            actions,
        },
        (
            Visible {
                model: Model::Matches,
                actions,
            },
            Event::FallbackPressed,
        ) if snapshot.fallbacks > 0 => Visible {
            model: Model::Fallbacks,
            actions,
        },

        (
            Visible {
                model,
                actions: ActionsState::Hidden,
            },
            Event::ActionsPressed,
        ) => Visible {
            model,
            actions: ActionsState::Shown,
        },
        (
            Visible {
                model,
                actions: ActionsState::Shown,
            },
            Event::ActionsReleased,
        ) => Visible {
            model,
            actions: ActionsState::Hidden,
        },

        (state, _) => state,
    }
}

fn results_effects(from: ResultsState, to: ResultsState, effects: &mut Vec<Effect>) {
    use ResultsState::{Hidden, Postponed, Visible};

    if from == to {
        return;
    }

    // Moves inside Visible only touch the sub-regions that changed
    if let (
        Visible {
            model: old_model,
            actions: old_actions,
        },
        Visible { model, actions },
    ) = (from, to)
    {
        if old_actions == ActionsState::Shown && actions == ActionsState::Hidden {
            effects.push(Effect::HideActions);
        }
        if old_model != model {
            effects.push(Effect::BindModel(model));
        }
        if old_actions == ActionsState::Hidden && actions == ActionsState::Shown {
            effects.push(Effect::ShowActions(model));
        }
        return;
    }

    match from {
        Visible { actions, .. } => {
            if actions == ActionsState::Shown {
                effects.push(Effect::HideActions);
            }
            effects.push(Effect::UnrouteResults);
        }
        Postponed => {
            effects.push(Effect::CommitDisplayed);
            effects.push(Effect::ThawResults);
        }
        Hidden => {}
    }

    match to {
        Hidden => effects.push(Effect::HideResults),
        Postponed => {
            effects.push(Effect::StartDebounce);
            effects.push(Effect::FreezeResults);
        }
        Visible { model, actions } => {
            effects.push(Effect::RouteResults);
            effects.push(Effect::BindModel(model));
            if actions == ActionsState::Shown {
                effects.push(Effect::ShowActions(model));
            }
        }
    }
}
