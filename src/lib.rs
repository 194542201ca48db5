//! calendar-chart-rs: date-keyed observations behind a calendar bar-chart view.
//!
//! The crate owns the data side of a "pick a day, see its chart" widget:
//! canonical date keys, a validated dataset with atomic replacement, and the
//! Idle/Showing selection state machine. Grid rendering, dialogs and chart
//! drawing stay with the host UI toolkit.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;

pub use api::{CalendarConfig, ControllerOutcome, SelectionController};
pub use error::{CalendarError, CalendarResult, LoadError};
