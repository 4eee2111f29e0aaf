mod activation;
mod keys;

pub use keys::KeyOutcome;

use crate::config::WindowConfig;
use crate::controller::QueryController;
use crate::history::History;
use crate::input::InputClassifier;
use crate::machine::{Effect, Event, Model, PresentationMachine, PresentationState, Snapshot};
use crate::query::{Generation, Query, QuerySource, Signal};
use crate::timer::DebounceTimer;
use crate::view::{Binding, View};
use boxmodel_types::ResultItem;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Redraw interval while the settings button fades
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// The launcher window's presentation core.
///
/// Owns the query controller, the presentation machine and the [`View`]
/// they drive. Frontends feed it text edits, key events, pointer events
/// and query updates, then draw [`Launcher::view`].
pub struct Launcher<S: QuerySource> {
    config: WindowConfig,
    controller: QueryController<S>,
    machine: PresentationMachine,
    view: View,
    timer: DebounceTimer,
    classifier: InputClassifier,
    history: History,

    /// Text last typed by the user, used to filter history
    user_text: String,

    visible: bool,
    pointer_over_input: bool,
    settings_requested: bool,
}

impl<S: QuerySource> Launcher<S> {
    pub fn new(config: &WindowConfig, source: S) -> Self {
        Self {
            config: config.clone(),
            controller: QueryController::new(source),
            machine: PresentationMachine::new(),
            view: View::new(config.button_fade()),
            timer: DebounceTimer::new(config.display_delay()),
            classifier: InputClassifier::new(config.mod_fallback, config.mod_actions),
            history: History::new(),
            user_text: String::new(),
            visible: false,
            pointer_over_input: false,
            settings_requested: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the window. Showing re-runs the query for the current
    /// text; hiding records the text in history and releases old queries.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;

        if visible {
            info!("Launcher shown");
            self.text_changed();
            return;
        }

        info!("Launcher hidden");
        if self.config.clear_on_hide {
            self.set_input("");
        } else {
            self.view.input.select_all = true;
        }

        let text = self.view.input.text.clone();
        self.history.add(&text);
        self.history.reset_iterator();
        self.user_text.clear();
        self.classifier.reset();

        let bound = self.view.results.binding.map(|b| b.generation);
        self.controller.trim(bound);
    }

    pub fn input(&self) -> &str {
        &self.view.input.text
    }

    /// Replace the input text, e.g. to pre-fill it before showing.
    pub fn set_input(&mut self, text: &str) {
        if self.view.input.text == text {
            return;
        }
        text.clone_into(&mut self.view.input.text);
        self.view.input.select_all = false;
        self.text_changed();
    }

    /// The user edited the input line.
    pub fn text_edited(&mut self, text: &str) {
        self.history.reset_iterator();
        text.clone_into(&mut self.user_text);
        text.clone_into(&mut self.view.input.text);
        self.view.input.select_all = false;
        self.text_changed();
    }

    /// Start a new query for the input text
    fn text_changed(&mut self) {
        let text = self.view.input.text.clone();
        let generation = self.controller.replace(&text);

        self.view.input.hint = match self.controller.get(generation) {
            Some(query) if query.string().is_empty() => query.synopsis().to_string(),
            _ => String::new(),
        };

        self.dispatch(Event::TextChanged);
    }

    /// Fold a worker update into its query and react to the signal it raises.
    pub fn on_query_update(&mut self, generation: Generation, update: <S::Query as Query>::Update) {
        match self.controller.deliver(generation, update) {
            Some(Signal::ResultsReady) => self.dispatch(Event::ResultsReady),
            Some(Signal::Finished) => self.dispatch(Event::QueryFinished),
            None => {}
        }
    }

    /// Fire the debounce timer if it is due.
    pub fn tick(&mut self, now: Instant) {
        if self.timer.expire(now) {
            debug!("Display delay expired");
            self.dispatch(Event::DebounceTimeout);
        }
    }

    /// When the frontend should call [`Launcher::tick`] or redraw next
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let frame = self
            .view
            .button
            .is_animating(now)
            .then(|| now + FRAME_INTERVAL);
        match (self.timer.deadline(), frame) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn pointer_entered_button(&mut self) {
        self.dispatch(Event::ButtonEntered);
    }

    pub fn pointer_left_button(&mut self) {
        self.dispatch(Event::ButtonLeft);
    }

    pub fn set_pointer_over_input(&mut self, over: bool) {
        self.pointer_over_input = over;
    }

    pub fn focus_lost(&mut self) {
        self.classifier.reset();
        if self.config.hide_on_focus_loss {
            self.set_visible(false);
        }
    }

    /// Ask for the settings and hide, as if the settings button was clicked
    pub fn open_settings(&mut self) {
        self.settings_requested = true;
        self.set_visible(false);
    }

    /// Whether settings were requested since the last call
    pub fn take_settings_request(&mut self) -> bool {
        std::mem::take(&mut self.settings_requested)
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn state(&self) -> PresentationState {
        self.machine.state()
    }

    pub fn controller(&self) -> &QueryController<S> {
        &self.controller
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Rows of the collection the results list is bound to
    pub fn results(&self) -> &[ResultItem] {
        self.view
            .results
            .binding
            .and_then(|b| self.controller.get(b.generation).map(|q| q.model(b.model)))
            .unwrap_or(&[])
    }

    /// Selected result row, only while the results list is shown
    fn selected_row(&self) -> Option<usize> {
        if self.view.results.visible {
            self.view.results.current
        } else {
            None
        }
    }

    fn snapshot(&self) -> Snapshot {
        let base = Snapshot {
            show_fallbacks_on_empty: self.config.show_fallbacks_on_empty,
            pointer_over_input: self.pointer_over_input,
            finished: true,
            ..Snapshot::default()
        };
        match self.controller.current() {
            Some(query) => Snapshot {
                matches: query.matches().len(),
                fallbacks: query.fallbacks().len(),
                finished: query.is_finished(),
                ..base
            },
            None => base,
        }
    }

    fn dispatch(&mut self, event: Event) {
        let snapshot = self.snapshot();
        for effect in self.machine.handle(event, &snapshot) {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        let now = Instant::now();
        match effect {
            Effect::FadeButton(direction) => self.view.button.start(direction, now),
            Effect::HideResults => self.view.results.visible = false,
            Effect::StartDebounce => self.timer.start(now),
            Effect::FreezeResults => self.view.results.enabled = false,
            Effect::CommitDisplayed => self.controller.commit_displayed(),
            Effect::ThawResults => {
                self.timer.stop();
                self.view.results.enabled = true;
            }
            Effect::RouteResults => self.view.routing.results = true,
            Effect::UnrouteResults => self.view.routing.results = false,
            Effect::BindModel(model) => self.bind_model(model),
            Effect::ShowActions(model) => self.show_actions(model),
            Effect::HideActions => {
                let actions = &mut self.view.actions;
                actions.visible = false;
                actions.items.clear();
                actions.current = None;
                self.view.routing.actions = false;
            }
        }
    }

    fn bind_model(&mut self, model: Model) {
        let Some(query) = self.controller.current() else {
            return;
        };
        let binding = Binding {
            generation: query.generation(),
            model,
        };
        let rows = query.model(model);
        let results = &mut self.view.results;

        match model {
            Model::Matches => {
                results.binding = Some(binding);
                results.select(0, rows.len());
                if !query.string().is_empty() {
                    self.view.input.hint = completion_hint(rows, results.current);
                }
            }
            Model::Fallbacks => {
                if results.binding != Some(binding) {
                    results.binding = Some(binding);
                    results.select(0, rows.len());
                }
            }
        }
        results.visible = true;
    }

    fn show_actions(&mut self, model: Model) {
        let Some(row) = self.selected_row() else {
            debug!("No row selected, actions stay hidden");
            return;
        };
        let Some(binding) = self.view.results.binding else {
            return;
        };
        let Some(query) = self.controller.get(binding.generation) else {
            return;
        };

        let actions = &mut self.view.actions;
        actions.items = query.actions(model, row).to_vec();
        actions.current = (!actions.items.is_empty()).then_some(0);
        actions.visible = true;
        self.view.routing.actions = true;
    }
}

fn completion_hint(rows: &[ResultItem], current: Option<usize>) -> String {
    current
        .and_then(|row| rows.get(row))
        .and_then(ResultItem::completion)
        .unwrap_or_default()
        .to_string()
}
