//! Tests for the presentation machine's transition function

use crate::machine::{
    ActionsState, ButtonState, Effect, Event, Model, PresentationMachine, PresentationState,
    ResultsState, Snapshot, transition,
};
use crate::view::FadeDirection;
use proptest::prelude::*;

fn snapshot(matches: usize, fallbacks: usize) -> Snapshot {
    Snapshot {
        matches,
        fallbacks,
        finished: false,
        show_fallbacks_on_empty: true,
        pointer_over_input: false,
    }
}

fn results(state: ResultsState) -> PresentationState {
    PresentationState {
        button: ButtonState::Hidden,
        results: state,
    }
}

fn visible(model: Model, actions: ActionsState) -> ResultsState {
    ResultsState::Visible { model, actions }
}

#[test]
fn test_initial_state() {
    let machine = PresentationMachine::new();
    assert_eq!(machine.state(), PresentationState::default());
    assert_eq!(machine.state().results, ResultsState::Hidden);
    assert_eq!(machine.state().button, ButtonState::Hidden);
}

#[test]
fn test_text_change_postpones_visible_results() {
    let from = results(visible(Model::Matches, ActionsState::Hidden));
    let (to, effects) = transition(from, Event::TextChanged, &snapshot(0, 0));

    assert_eq!(to.results, ResultsState::Postponed);
    assert_eq!(
        effects,
        [
            Effect::FadeButton(FadeDirection::Forward),
            Effect::UnrouteResults,
            Effect::StartDebounce,
            Effect::FreezeResults,
        ]
    );
}

#[test]
fn test_text_change_keeps_hidden_results_hidden() {
    let (to, effects) = transition(
        PresentationState::default(),
        Event::TextChanged,
        &snapshot(0, 0),
    );
    assert_eq!(to.results, ResultsState::Hidden);
    assert_eq!(to.button, ButtonState::Shown);
    assert_eq!(effects, [Effect::FadeButton(FadeDirection::Forward)]);
}

#[test]
fn test_leaving_visible_with_actions_hides_them_first() {
    let from = results(visible(Model::Fallbacks, ActionsState::Shown));
    let (_, effects) = transition(from, Event::TextChanged, &snapshot(0, 2));
    assert_eq!(
        &effects[1..3],
        [Effect::HideActions, Effect::UnrouteResults]
    );
}

#[test]
fn test_debounce_timeout_hides_postponed() {
    let (to, effects) = transition(
        results(ResultsState::Postponed),
        Event::DebounceTimeout,
        &snapshot(0, 0),
    );
    assert_eq!(to.results, ResultsState::Hidden);
    assert_eq!(
        effects,
        [
            Effect::CommitDisplayed,
            Effect::ThawResults,
            Effect::HideResults
        ]
    );
}

#[test]
fn test_debounce_timeout_ignored_outside_postponed() {
    for state in [
        ResultsState::Hidden,
        visible(Model::Matches, ActionsState::Hidden),
    ] {
        let (to, effects) = transition(results(state), Event::DebounceTimeout, &snapshot(1, 1));
        assert_eq!(to.results, state);
        assert!(effects.is_empty());
    }
}

#[test]
fn test_results_ready_beats_fallbacks_from_postponed() {
    let (to, effects) = transition(
        results(ResultsState::Postponed),
        Event::ResultsReady,
        &snapshot(1, 3),
    );
    assert_eq!(to.results, visible(Model::Matches, ActionsState::Hidden));
    assert_eq!(
        effects,
        [
            Effect::CommitDisplayed,
            Effect::ThawResults,
            Effect::RouteResults,
            Effect::BindModel(Model::Matches),
        ]
    );
}

#[test]
fn test_results_ready_from_hidden_shows_matches() {
    let (to, effects) = transition(
        PresentationState::default(),
        Event::ResultsReady,
        &snapshot(1, 0),
    );
    assert_eq!(to.results, visible(Model::Matches, ActionsState::Hidden));
    assert_eq!(
        effects,
        [Effect::RouteResults, Effect::BindModel(Model::Matches)]
    );
}

#[test]
fn test_results_ready_while_peeking_keeps_fallbacks() {
    let from = results(visible(Model::Fallbacks, ActionsState::Hidden));
    let (to, effects) = transition(from, Event::ResultsReady, &snapshot(3, 2));
    assert_eq!(to, from);
    assert!(effects.is_empty());
}

#[test]
fn test_finish_without_fallback_display_hides() {
    let snap = Snapshot {
        show_fallbacks_on_empty: false,
        finished: true,
        ..snapshot(0, 2)
    };
    let (to, _) = transition(results(ResultsState::Postponed), Event::QueryFinished, &snap);
    assert_eq!(to.results, ResultsState::Hidden);
}

#[test]
fn test_finish_without_fallbacks_hides() {
    let (to, _) = transition(
        results(ResultsState::Postponed),
        Event::QueryFinished,
        &snapshot(0, 0),
    );
    assert_eq!(to.results, ResultsState::Hidden);
}

#[test]
fn test_finish_with_fallbacks_shows_them() {
    for from in [ResultsState::Postponed, ResultsState::Hidden] {
        let (to, effects) = transition(results(from), Event::QueryFinished, &snapshot(0, 2));
        assert_eq!(to.results, visible(Model::Fallbacks, ActionsState::Hidden));
        assert_eq!(effects.last(), Some(&Effect::BindModel(Model::Fallbacks)));
    }
}

#[test]
fn test_finish_from_hidden_without_fallbacks_stays() {
    let (to, effects) = transition(
        PresentationState::default(),
        Event::QueryFinished,
        &snapshot(0, 0),
    );
    assert_eq!(to, PresentationState::default());
    assert!(effects.is_empty());
}

#[test]
fn test_fallback_peek_from_hidden() {
    let snap = snapshot(0, 2);
    let (peeking, _) = transition(PresentationState::default(), Event::FallbackPressed, &snap);
    assert_eq!(peeking.results, visible(Model::Fallbacks, ActionsState::Hidden));

    let (released, effects) = transition(peeking, Event::FallbackReleased, &snap);
    assert_eq!(released.results, ResultsState::Hidden);
    assert_eq!(effects, [Effect::UnrouteResults, Effect::HideResults]);
}

#[test]
fn test_fallback_release_with_matches_shows_matches() {
    let from = results(visible(Model::Fallbacks, ActionsState::Hidden));
    let (to, effects) = transition(from, Event::FallbackReleased, &snapshot(2, 2));
    assert_eq!(to.results, visible(Model::Matches, ActionsState::Hidden));
    assert_eq!(effects, [Effect::BindModel(Model::Matches)]);
}

#[test]
fn test_fallback_press_without_fallbacks_is_ignored() {
    for from in [
        ResultsState::Hidden,
        ResultsState::Postponed,
        visible(Model::Matches, ActionsState::Hidden),
    ] {
        let (to, _) = transition(results(from), Event::FallbackPressed, &snapshot(1, 0));
        assert_eq!(to.results, from);
    }
}

#[test]
fn test_fallback_press_over_matches_keeps_actions() {
    let from = results(visible(Model::Matches, ActionsState::Shown));
    let (to, effects) = transition(from, Event::FallbackPressed, &snapshot(1, 1));
    assert_eq!(to.results, visible(Model::Fallbacks, ActionsState::Shown));
    assert_eq!(effects, [Effect::BindModel(Model::Fallbacks)]);
}

#[test]
fn test_actions_region() {
    let from = results(visible(Model::Matches, ActionsState::Hidden));
    let (shown, effects) = transition(from, Event::ActionsPressed, &snapshot(1, 0));
    assert_eq!(shown.results, visible(Model::Matches, ActionsState::Shown));
    assert_eq!(effects, [Effect::ShowActions(Model::Matches)]);

    let (hidden, effects) = transition(shown, Event::ActionsReleased, &snapshot(1, 0));
    assert_eq!(hidden.results, visible(Model::Matches, ActionsState::Hidden));
    assert_eq!(effects, [Effect::HideActions]);
}

#[test]
fn test_actions_ignored_without_results() {
    for from in [ResultsState::Hidden, ResultsState::Postponed] {
        let (to, effects) = transition(results(from), Event::ActionsPressed, &snapshot(1, 1));
        assert_eq!(to.results, from);
        assert!(effects.is_empty());
    }
}

#[test]
fn test_button_shows_on_hover_and_typing() {
    for event in [Event::ButtonEntered, Event::TextChanged] {
        let (to, _) = transition(PresentationState::default(), event, &snapshot(0, 0));
        assert_eq!(to.button, ButtonState::Shown);
    }
}

#[test]
fn test_button_hides_when_query_finishes() {
    let shown = PresentationState {
        button: ButtonState::Shown,
        results: ResultsState::Hidden,
    };
    let (to, effects) = transition(shown, Event::QueryFinished, &snapshot(0, 0));
    assert_eq!(to.button, ButtonState::Hidden);
    assert_eq!(effects, [Effect::FadeButton(FadeDirection::Backward)]);
}

#[test]
fn test_button_stays_while_pointer_over_input() {
    let shown = PresentationState {
        button: ButtonState::Shown,
        results: ResultsState::Hidden,
    };
    let snap = Snapshot {
        pointer_over_input: true,
        ..snapshot(0, 0)
    };
    let (to, _) = transition(shown, Event::QueryFinished, &snap);
    assert_eq!(to.button, ButtonState::Shown);
}

#[test]
fn test_button_leave_hides_only_when_finished() {
    let shown = PresentationState {
        button: ButtonState::Shown,
        results: ResultsState::Hidden,
    };
    let (running, _) = transition(shown, Event::ButtonLeft, &snapshot(0, 0));
    assert_eq!(running.button, ButtonState::Shown);

    let finished = Snapshot {
        finished: true,
        ..snapshot(0, 0)
    };
    let (done, _) = transition(shown, Event::ButtonLeft, &finished);
    assert_eq!(done.button, ButtonState::Hidden);
}

#[test]
fn test_button_effect_precedes_results_effects() {
    let (_, effects) = transition(
        results(visible(Model::Matches, ActionsState::Hidden)),
        Event::TextChanged,
        &snapshot(0, 0),
    );
    assert!(matches!(effects[0], Effect::FadeButton(_)));
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::TextChanged),
        Just(Event::ResultsReady),
        Just(Event::QueryFinished),
        Just(Event::DebounceTimeout),
        Just(Event::FallbackPressed),
        Just(Event::FallbackReleased),
        Just(Event::ActionsPressed),
        Just(Event::ActionsReleased),
        Just(Event::ButtonEntered),
        Just(Event::ButtonLeft),
    ]
}

prop_compose! {
    fn arb_snapshot()(
        matches in 0usize..3,
        fallbacks in 0usize..3,
        finished: bool,
        show_fallbacks_on_empty: bool,
        pointer_over_input: bool,
    ) -> Snapshot {
        Snapshot { matches, fallbacks, finished, show_fallbacks_on_empty, pointer_over_input }
    }
}

/// What the effects have done to a view so far
#[derive(Default)]
struct Applied {
    routed: bool,
    actions: bool,
    frozen: bool,
    button: bool,
}

impl Applied {
    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::RouteResults => self.routed = true,
            Effect::UnrouteResults => self.routed = false,
            Effect::ShowActions(_) => self.actions = true,
            Effect::HideActions => self.actions = false,
            Effect::FreezeResults => self.frozen = true,
            Effect::ThawResults => self.frozen = false,
            Effect::FadeButton(direction) => self.button = direction == FadeDirection::Forward,
            _ => {}
        }
    }
}

proptest! {
    #[test]
    fn effects_track_state(steps in prop::collection::vec((arb_event(), arb_snapshot()), 0..64)) {
        let mut machine = PresentationMachine::new();
        let mut applied = Applied::default();

        for (event, snap) in steps {
            for effect in machine.handle(event, &snap) {
                applied.apply(effect);
            }
            let state = machine.state();
            prop_assert_eq!(applied.routed, state.results.is_visible());
            prop_assert_eq!(
                applied.actions,
                matches!(state.results, ResultsState::Visible { actions: ActionsState::Shown, .. })
            );
            prop_assert_eq!(applied.frozen, state.results == ResultsState::Postponed);
            prop_assert_eq!(applied.button, state.button == ButtonState::Shown);

            let leaves = state.active_leaves();
            let expected = if state.results.is_visible() { 3 } else { 2 };
            prop_assert_eq!(leaves.len(), expected);
        }
    }

    #[test]
    fn results_ready_from_postponed_always_shows_matches(snap in arb_snapshot()) {
        let (to, _) = transition(results(ResultsState::Postponed), Event::ResultsReady, &snap);
        prop_assert_eq!(to.results, visible(Model::Matches, ActionsState::Hidden));
    }

    #[test]
    fn disabled_fallback_display_never_shows_fallbacks_on_finish(mut snap in arb_snapshot()) {
        snap.show_fallbacks_on_empty = false;
        let (to, _) = transition(results(ResultsState::Postponed), Event::QueryFinished, &snap);
        prop_assert_eq!(to.results, ResultsState::Hidden);
    }
}
