//! Presentation-facing helpers layered over the core store.
//!
//! Nothing here mutates controller state.

pub mod markers;
pub mod plugins;

pub use markers::{
    DayHighlight, DayMarker, day_highlight, markers_for_dataset, markers_in_month,
};
pub use plugins::{SelectionContext, SelectionEvent, SelectionObserver};
