//! Client-side data-synchronization layer for a users/posts admin console.
//!
//! The crate is organized around three pieces:
//! - [`api`]: a typed HTTP client for the remote record service.
//! - [`store`]: per-entity in-memory caches that apply fetch/create/update/
//!   delete against the remote service and notify subscribers on change.
//! - [`stats`]: pure functions computing display aggregates from store
//!   snapshots.
//!
//! Presentation code (the CLI in `main.rs`, or any other front-end) reads
//! store snapshots and routes every mutation through store commands; it never
//! touches the cache directly.

pub mod api;
pub mod config;
pub mod stats;
pub mod store;

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Respects `RUST_LOG`; defaults to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}
