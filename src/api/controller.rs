use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, trace};

use crate::core::{
    CalendarDay, ChartRow, DatasetSource, DateDataStore, DateDataset, DateKey, DateKeyFormatter,
    Observation, chart_rows,
};
use crate::error::{CalendarError, CalendarResult};
use crate::extensions::{
    DayHighlight, DayMarker, SelectionEvent, SelectionObserver, day_highlight,
    markers_for_dataset, markers_in_month,
};
use crate::interaction::{SelectionMode, SelectionState};

use super::CalendarConfig;

/// Result of activating a date in the calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ControllerOutcome {
    /// The date has data; its detail view is now visible.
    Shown { key: DateKey, rows: Vec<Observation> },
    /// The date has no data; the host should show a notice.
    NoData { key: DateKey },
}

impl ControllerOutcome {
    #[must_use]
    pub fn key(&self) -> &DateKey {
        match self {
            Self::Shown { key, .. } | Self::NoData { key } => key,
        }
    }

    #[must_use]
    pub fn is_shown(&self) -> bool {
        matches!(self, Self::Shown { .. })
    }

    #[must_use]
    pub fn rows(&self) -> &[Observation] {
        match self {
            Self::Shown { rows, .. } => rows.as_slice(),
            Self::NoData { .. } => &[],
        }
    }

    #[must_use]
    pub fn chart_rows(&self) -> Vec<ChartRow> {
        chart_rows(self.rows())
    }
}

/// The three operations an application shell drives.
///
/// Implemented by the controller itself and by adapters that share it.
pub trait CalendarCore {
    fn on_date_activated(&mut self, date: NaiveDate) -> ControllerOutcome;
    fn on_dismiss(&mut self);
    fn load_data(&mut self, source: DatasetSource) -> CalendarResult<()>;
}

/// Owns the selection state machine and the dataset it queries.
pub struct SelectionController {
    pub(super) config: CalendarConfig,
    pub(super) store: Arc<DateDataStore>,
    pub(super) selection: SelectionState,
    pub(super) observers: Vec<Box<dyn SelectionObserver>>,
}

impl SelectionController {
    /// Creates an Idle controller over an empty dataset.
    pub fn new(config: CalendarConfig) -> CalendarResult<Self> {
        let store = Arc::new(DateDataStore::new(config.formatter()));
        Self::with_store(config, store)
    }

    /// Creates an Idle controller over an existing, possibly shared, store.
    pub fn with_store(config: CalendarConfig, store: Arc<DateDataStore>) -> CalendarResult<Self> {
        config.validate()?;
        if store.formatter() != config.formatter() {
            return Err(CalendarError::InvalidData(format!(
                "store keys use {} but config expects {}",
                store.formatter().key_format().pattern(),
                config.key_format.pattern()
            )));
        }
        Ok(Self {
            config,
            store,
            selection: SelectionState::default(),
            observers: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &Arc<DateDataStore> {
        &self.store
    }

    #[must_use]
    pub fn formatter(&self) -> DateKeyFormatter {
        self.store.formatter()
    }

    /// Raw selection state, not yet reconciled with the store.
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Showing only while the selected date still has data in the store.
    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        if self.selected_key().is_some() {
            SelectionMode::Showing
        } else {
            SelectionMode::Idle
        }
    }

    /// Selected key, or `None` once the store has no data for it.
    ///
    /// A shared store may be replaced without going through this controller,
    /// so the raw [`selection`](Self::selection) can lag behind until the
    /// next transition or [`refresh_selection`](Self::refresh_selection).
    #[must_use]
    pub fn selected_key(&self) -> Option<&DateKey> {
        live_key(&self.selection, &self.store.snapshot())
    }

    #[must_use]
    pub fn is_detail_visible(&self) -> bool {
        self.selected_key().is_some()
    }

    /// Rows of the shown date; empty while Idle.
    #[must_use]
    pub fn current_rows(&self) -> Vec<Observation> {
        let dataset = self.store.snapshot();
        live_key(&self.selection, &dataset)
            .map(|key| dataset.rows_for(key).to_vec())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn current_chart_rows(&self) -> Vec<ChartRow> {
        chart_rows(&self.current_rows())
    }

    /// Title for the open detail view, e.g. `Data for 01-09-2025`.
    #[must_use]
    pub fn detail_title(&self) -> Option<String> {
        self.selected_key().map(|key| self.config.detail_title(key))
    }

    #[must_use]
    pub fn no_data_notice(&self) -> &str {
        &self.config.no_data_notice
    }

    /// Activates the calendar day of `date`.
    ///
    /// Data-bearing dates move to Showing, including re-entry on the date
    /// already shown. Anything else returns to Idle.
    pub fn select_date(&mut self, date: impl CalendarDay) -> ControllerOutcome {
        self.refresh_selection();
        let key = self.formatter().format(date);
        let dataset = self.store.snapshot();

        if dataset.has(&key) {
            let rows = dataset.rows_for(&key).to_vec();
            let previous = self.selection.selected_key().cloned();
            self.selection.on_show(key.clone());
            debug!(
                key = %key,
                rows = rows.len(),
                previous = ?previous.as_ref().map(DateKey::as_str),
                "showing date detail"
            );
            self.emit_observer_event(SelectionEvent::DateShown {
                key: key.clone(),
                rows_len: rows.len(),
            });
            ControllerOutcome::Shown { key, rows }
        } else {
            let previous = self.selection.on_clear();
            debug!(
                key = %key,
                closed = ?previous.as_ref().map(DateKey::as_str),
                "no data for date"
            );
            self.emit_observer_event(SelectionEvent::NoDataForDate { key: key.clone() });
            ControllerOutcome::NoData { key }
        }
    }

    /// Hides the detail view. Returns `false` when already Idle, including a
    /// selection whose data was dropped by an outside reload.
    pub fn dismiss(&mut self) -> bool {
        self.refresh_selection();
        match self.selection.on_clear() {
            Some(key) => {
                debug!(key = %key, "dismissed date detail");
                self.emit_observer_event(SelectionEvent::Dismissed { key });
                true
            }
            None => {
                trace!("dismiss while idle");
                false
            }
        }
    }

    /// Validates `source` and swaps it in as the whole dataset.
    ///
    /// A rejected source leaves both the dataset and the selection untouched.
    pub fn load_data(&mut self, source: DatasetSource) -> CalendarResult<()> {
        let dataset = self.store.replace_all(source)?;
        self.refresh_selection();
        self.emit_observer_event(SelectionEvent::DataReloaded {
            dates_with_data: dataset.dates_with_data(),
        });
        Ok(())
    }

    /// Drops the selection when the current dataset no longer has data for it.
    ///
    /// Every transition runs this first, and the read accessors already treat
    /// such a selection as Idle. Hosts that replace a shared store directly
    /// call it to get the `SelectionInvalidated` event right away. Returns
    /// `true` when the selection was dropped.
    pub fn refresh_selection(&mut self) -> bool {
        let stale = self
            .selection
            .selected_key()
            .is_some_and(|key| !self.store.has(key));
        if !stale {
            return false;
        }
        match self.selection.on_clear() {
            Some(key) => {
                debug!(key = %key, "selected date lost its data on reload");
                self.emit_observer_event(SelectionEvent::SelectionInvalidated { key });
                true
            }
            None => false,
        }
    }

    /// Markers for every data-bearing date, oldest first.
    #[must_use]
    pub fn day_markers(&self) -> Vec<DayMarker> {
        markers_for_dataset(&self.store.snapshot(), &self.config.marker_title)
    }

    pub fn day_markers_in_month(&self, year: i32, month: u32) -> CalendarResult<Vec<DayMarker>> {
        markers_in_month(
            &self.store.snapshot(),
            year,
            month,
            &self.config.marker_title,
        )
    }

    #[must_use]
    pub fn day_highlight(&self, date: impl CalendarDay) -> DayHighlight {
        let key = self.formatter().format(date);
        let dataset = self.store.snapshot();
        day_highlight(&dataset, live_key(&self.selection, &dataset), &key)
    }
}

/// Selected key of `selection` if `dataset` has data for it.
pub(super) fn live_key<'a>(
    selection: &'a SelectionState,
    dataset: &DateDataset,
) -> Option<&'a DateKey> {
    selection.selected_key().filter(|key| dataset.has(*key))
}

impl CalendarCore for SelectionController {
    fn on_date_activated(&mut self, date: NaiveDate) -> ControllerOutcome {
        self.select_date(date)
    }

    fn on_dismiss(&mut self) {
        self.dismiss();
    }

    fn load_data(&mut self, source: DatasetSource) -> CalendarResult<()> {
        SelectionController::load_data(self, source)
    }
}
