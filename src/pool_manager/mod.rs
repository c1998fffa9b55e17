//! # Pool Manager
//!
//! Owns the registry of burrow actors and drives the two request patterns that
//! span the whole pool:
//!
//! - **Broadcast and collect** (`current_status`, shutdown): every actor gets the
//!   request from its own helper task and replies on one shared channel.
//! - **Two-phase rentout**: broadcast `Available`, keep the first offer, then
//!   complete the handoff over that actor's private continuation channel.
//!
//! ## Structure
//!
//! - [`control`] - [`ControlLoop`], the single writer of the registry
//! - [`client`] - [`PoolManager`], the cloneable handle implementing
//!   [`BurrowPool`](crate::clients::BurrowPool)
//! - [`dump`] - the JSON file written with the final snapshots on shutdown

pub mod client;
pub mod control;
pub mod dump;

pub use client::*;
pub use control::*;
pub use dump::*;
