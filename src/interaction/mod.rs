use serde::{Deserialize, Serialize};

use crate::core::DateKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionMode {
    /// No date selected; detail view hidden.
    Idle,
    /// A data-bearing date is selected and its detail view is visible.
    Showing,
}

/// Selected date plus detail-view visibility.
///
/// Visibility is derived from the selection, so a visible detail view always
/// has a key and a hidden one never does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<DateKey>,
}

impl SelectionState {
    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        if self.selected.is_some() {
            SelectionMode::Showing
        } else {
            SelectionMode::Idle
        }
    }

    #[must_use]
    pub fn selected_key(&self) -> Option<&DateKey> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn is_detail_visible(&self) -> bool {
        self.selected.is_some()
    }

    #[must_use]
    pub fn is_showing(&self, key: &DateKey) -> bool {
        self.selected.as_ref() == Some(key)
    }

    pub fn on_show(&mut self, key: DateKey) {
        self.selected = Some(key);
    }

    /// Returns the key that was shown, if any.
    pub fn on_clear(&mut self) -> Option<DateKey> {
        self.selected.take()
    }
}
