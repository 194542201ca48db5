use serde::Serialize;

use crate::core::DateKey;
use crate::interaction::SelectionMode;

/// Read-only controller state passed to observer hooks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionContext {
    pub mode: SelectionMode,
    pub selected_key: Option<DateKey>,
    pub dates_with_data: usize,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SelectionEvent {
    DateShown { key: DateKey, rows_len: usize },
    NoDataForDate { key: DateKey },
    Dismissed { key: DateKey },
    DataReloaded { dates_with_data: usize },
    /// A reload removed the data of the date that was being shown.
    SelectionInvalidated { key: DateKey },
}

/// Subscription hook for views that mirror controller state.
///
/// Observers see every transition but cannot mutate the controller.
pub trait SelectionObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &SelectionEvent, context: &SelectionContext);
}
