//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the
//! `tracing` crate. Log lines are compact and hide the module prefix; every
//! burrow-related event carries the burrow's `name` as a structured field.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle events: admissions, rentals, shutdown, dump file
//! RUST_LOG=info cargo run -- serve
//!
//! # Every offer, lapse and broadcast
//! RUST_LOG=debug cargo run -- serve
//! ```
//!
//! ## Rentout Trace Example
//!
//! **With `RUST_LOG=debug`**:
//!
//! ```text
//! INFO rentout{deadline=3s}: Start rentout request
//! DEBUG rentout{deadline=3s}: Send available request to all burrows count=3
//! DEBUG Offer published name="Burrow 2"
//! DEBUG Nobody to receive my offer name="Burrow 1"
//! DEBUG rentout{deadline=3s}: Available burrow name="Burrow 2"
//! INFO Burrow rented name="Burrow 2"
//! INFO rentout{deadline=3s}: Burrow rented out name="Burrow 2"
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Falls back to `info` when `RUST_LOG` is unset.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
