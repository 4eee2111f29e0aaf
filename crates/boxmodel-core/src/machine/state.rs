use serde::Serialize;

/// Settings button region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ButtonState {
    #[default]
    Hidden,
    Shown,
}

/// Which collection the results list is bound to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Model {
    #[default]
    Matches,
    Fallbacks,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ActionsState {
    #[default]
    Hidden,
    Shown,
}

/// Results region. `Visible` carries its two parallel sub-regions, so a
/// visible list always has exactly one active model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ResultsState {
    #[default]
    Hidden,
    Postponed,
    Visible { model: Model, actions: ActionsState },
}

impl ResultsState {
    pub fn visible(model: Model) -> Self {
        Self::Visible {
            model,
            actions: ActionsState::Hidden,
        }
    }

    pub fn model(self) -> Option<Model> {
        match self {
            Self::Visible { model, .. } => Some(model),
            _ => None,
        }
    }

    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible { .. })
    }
}

/// Full state of both top-level regions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PresentationState {
    pub button: ButtonState,
    pub results: ResultsState,
}

impl PresentationState {
    /// Names of the active leaf states, one per active region.
    pub fn active_leaves(&self) -> Vec<&'static str> {
        let mut leaves = vec![match self.button {
            ButtonState::Hidden => "button.hidden",
            ButtonState::Shown => "button.shown",
        }];
        match self.results {
            ResultsState::Hidden => leaves.push("results.hidden"),
            ResultsState::Postponed => leaves.push("results.postponed"),
            ResultsState::Visible { model, actions } => {
                leaves.push(match model {
                    Model::Matches => "results.visible.model.matches",
                    Model::Fallbacks => "results.visible.model.fallbacks",
                });
                leaves.push(match actions {
                    ActionsState::Hidden => "results.visible.actions.hidden",
                    ActionsState::Shown => "results.visible.actions.shown",
                });
            }
        }
        leaves
    }
}
