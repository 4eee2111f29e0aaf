//! Tests for the query lifecycle controller

use super::fixtures::{FakeUpdate, make_match, make_source};
use crate::controller::QueryController;
use crate::query::{Query, Signal};

#[test]
fn test_replace_assigns_increasing_generations() {
    let (source, log) = make_source(0);
    let mut controller = QueryController::new(source);

    let first = controller.replace("a");
    let second = controller.replace("ab");

    assert!(second > first);
    assert_eq!(controller.current_generation(), Some(second));
    assert_eq!(controller.current().map(Query::string), Some("ab"));
    assert_eq!(log.borrow().ran, [first, second]);
}

#[test]
fn test_replace_cancels_previous_before_starting_next() {
    let (source, log) = make_source(0);
    let mut controller = QueryController::new(source);

    let first = controller.replace("a");
    assert!(log.borrow().canceled.is_empty());

    controller.replace("ab");
    assert_eq!(log.borrow().canceled, [first]);
}

#[test]
fn test_stale_signals_are_dropped() {
    let (source, _log) = make_source(0);
    let mut controller = QueryController::new(source);

    let stale = controller.replace("a");
    let current = controller.replace("ab");

    let signal = controller.deliver(stale, FakeUpdate::Matches(vec![make_match("x")]));
    assert_eq!(signal, None);
    assert_eq!(controller.deliver(stale, FakeUpdate::Finished), None);

    let signal = controller.deliver(current, FakeUpdate::Matches(vec![make_match("y")]));
    assert_eq!(signal, Some(Signal::ResultsReady));
}

#[test]
fn test_canceled_query_may_still_finish() {
    let (source, _log) = make_source(0);
    let mut controller = QueryController::new(source);

    let stale = controller.replace("a");
    controller.replace("ab");
    controller.deliver(stale, FakeUpdate::Finished);

    // Integrated but not signalled
    assert!(controller.get(stale).is_some_and(Query::is_finished));
    assert!(controller.get(stale).is_some_and(|q| q.matches().is_empty()));
}

#[test]
fn test_finished_is_signalled_once() {
    let (source, _log) = make_source(0);
    let mut controller = QueryController::new(source);

    let generation = controller.replace("a");
    assert_eq!(
        controller.deliver(generation, FakeUpdate::Finished),
        Some(Signal::Finished)
    );
    assert_eq!(controller.deliver(generation, FakeUpdate::Finished), None);
}

#[test]
fn test_update_for_released_query_is_ignored() {
    let (source, _log) = make_source(0);
    let mut controller = QueryController::new(source);

    let released = controller.replace("a");
    controller.replace("ab");
    controller.trim(None);

    assert!(controller.get(released).is_none());
    assert_eq!(controller.deliver(released, FakeUpdate::Finished), None);
}

#[test]
fn test_trim_keeps_current_displayed_and_bound() {
    let (source, _log) = make_source(0);
    let mut controller = QueryController::new(source);

    let bound = controller.replace("a");
    let displayed = controller.replace("ab");
    controller.commit_displayed();
    controller.replace("abc");
    let current = controller.replace("abcd");

    controller.trim(Some(bound));

    let retained: Vec<_> = controller.retained().collect();
    assert_eq!(retained, [bound, displayed, current]);
    assert_eq!(controller.displayed_generation(), Some(displayed));
}

#[test]
fn test_commit_displayed_follows_current() {
    let (source, _log) = make_source(0);
    let mut controller = QueryController::new(source);
    assert!(controller.displayed().is_none());

    let generation = controller.replace("a");
    controller.commit_displayed();
    assert_eq!(controller.displayed().map(Query::generation), Some(generation));
}
