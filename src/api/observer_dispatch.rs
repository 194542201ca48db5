use tracing::trace;

use crate::extensions::{SelectionContext, SelectionEvent};
use crate::interaction::SelectionMode;

use super::SelectionController;
use super::controller::live_key;

impl SelectionController {
    pub(super) fn observer_context(&self) -> SelectionContext {
        let dataset = self.store.snapshot();
        let selected_key = live_key(&self.selection, &dataset).cloned();
        SelectionContext {
            mode: if selected_key.is_some() {
                SelectionMode::Showing
            } else {
                SelectionMode::Idle
            },
            selected_key,
            dates_with_data: dataset.dates_with_data(),
        }
    }

    pub(super) fn emit_observer_event(&mut self, event: SelectionEvent) {
        if self.observers.is_empty() {
            return;
        }
        let context = self.observer_context();
        trace!(observers = self.observers.len(), ?event, "dispatch selection event");
        for observer in &mut self.observers {
            observer.on_event(&event, &context);
        }
    }
}
