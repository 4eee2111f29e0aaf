use super::Launcher;
use crate::query::{Query, QuerySource};
use boxmodel_types::Modifiers;
use tracing::{info, warn};

impl<S: QuerySource> Launcher<S> {
    /// Activate `action` of result `row` in whichever collection is shown.
    ///
    /// Action 0 is the item's default activation. With Control held the
    /// window stays open and the query is re-run, otherwise it hides.
    pub fn activate(&mut self, row: usize, action: usize, modifiers: Modifiers) {
        match (self.state().results.model(), self.controller.current()) {
            (Some(model), Some(query)) => {
                info!("Activating {model:?} row {row} action {action}");
                query.activate(model, row, action);
            }
            _ => warn!("Activated row {row} while neither matches nor fallbacks are shown"),
        }

        // Recorded on every activation, hiding records it again
        let text = self.view.input.text.clone();
        self.history.add(&text);

        if modifiers.control {
            self.text_changed();
        } else {
            self.set_visible(false);
        }
    }
}
