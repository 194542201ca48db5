//! Log output for hosts that do not install their own `tracing` subscriber.
//!
//! Events are emitted under the crate's module targets:
//! - `calendar_chart::core::store`: dataset swaps at `debug`, rejected sources
//!   at `warn`.
//! - `calendar_chart::core::data_set`: each validated date at `trace`.
//! - `calendar_chart::api::controller`: selection transitions at `debug`.
//! - `calendar_chart::api::observer_dispatch` and `api::shared_store`: event
//!   fan-out and dispatched actions at `trace`.

/// Filter used when `RUST_LOG` is unset. Rejected dataset loads stay visible.
pub const DEFAULT_TRACING_FILTER: &str = "calendar_chart=info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_TRACING_FILTER`].
///
/// Requires the `telemetry` feature. Returns `false` without it, or when the
/// host already installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACING_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
