//! The capability interface collaborators program against.

pub mod pool_client;

pub use pool_client::*;
