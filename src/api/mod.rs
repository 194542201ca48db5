//! Host-facing surface: the selection controller, its configuration, observer
//! registration, JSON contracts and the shared-store adapter.

mod calendar_config;
mod controller;
mod json_contract;
mod observer_dispatch;
mod observer_registry;
mod shared_store;

pub use calendar_config::CalendarConfig;
pub use controller::{CalendarCore, ControllerOutcome, SelectionController};
pub use json_contract::{
    SELECTION_SNAPSHOT_JSON_SCHEMA_V1, SelectionSnapshot, SelectionSnapshotJsonContractV1,
};
pub use shared_store::{CalendarAction, DispatchOutcome, SharedCalendarStore};
