//! # Burrow Actor
//!
//! One actor per burrow. The actor owns the burrow's state for its entire life;
//! the only way to observe or change it is a request/response round trip.
//!
//! ## Structure
//!
//! - [`actor`] - [`BurrowActor`], the event loop (aging tick + inbox + negotiation)
//! - [`handle`] - [`BurrowHandle`], the cloneable sending side
//! - [`spawn()`] - creates the pair and starts the loop on the Tokio runtime
//!
//! ## Usage
//!
//! ```rust
//! use burrow_pool::burrow_actor;
//! use burrow_pool::framework::PoolConfig;
//! use burrow_pool::model::Burrow;
//!
//! #[tokio::main]
//! async fn main() {
//!     let burrow = Burrow::new("Burrow 1", 2.5, 1.2, 10);
//!     let handle = burrow_actor::spawn(burrow, &PoolConfig::default());
//!     let snapshot = handle.status().await.unwrap();
//!     assert!(snapshot.is_available());
//! }
//! ```

pub mod actor;
pub mod handle;

pub use actor::*;
pub use handle::*;

use crate::framework::PoolConfig;
use crate::model::Burrow;

/// Creates a new burrow actor, spawns its loop and returns the handle.
pub fn spawn(initial: Burrow, config: &PoolConfig) -> BurrowHandle {
    let (actor, handle) = BurrowActor::new(initial, config);
    tokio::spawn(actor.run());
    handle
}
