//! Building blocks shared by the pool manager and the burrow actors.
//!
//! # Main Components
//!
//! - [`message`] - [`BurrowRequest`], [`BurrowResponse`], [`AssignRequest`] and the
//!   reply channels that carry them
//! - [`config`] - [`PoolConfig`], the timing and sizing knobs
//! - [`error`] - [`RentError`], [`PoolError`] and the artifact errors
//!
//! # Testing
//!
//! See [`mock`] module for a scripted [`BurrowPool`](crate::clients::BurrowPool)
//! that tests collaborators without spawning any actor.

pub mod config;
pub mod error;
pub mod message;
pub mod mock;

pub use config::*;
pub use error::*;
pub use message::*;
