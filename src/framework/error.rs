//! # Pool Errors
//!
//! Every failure the pool can report is an ordinary value. None of them corrupt
//! pool state: a lapsed offer always leaves its burrow available again, and
//! artifact failures only mean a missed file.

use thiserror::Error;

/// Errors returned by [`rentout`](crate::clients::BurrowPool::rentout).
///
/// Both timing errors are retriable by calling `rentout` again.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RentError {
    /// No burrow published an offer before the deadline.
    #[error("no burrow available")]
    NoBurrowAvailable,

    /// An offer arrived but the handoff did not complete before the deadline.
    #[error("available burrow did not respond in time")]
    AssignmentTimedOut,

    /// The pool has shut down.
    #[error("burrow pool is closed")]
    PoolClosed,
}

/// Errors returned when admitting a burrow.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PoolError {
    /// The pool has shut down.
    #[error("burrow pool is closed")]
    PoolClosed,

    /// A burrow with this name is already managed.
    #[error("burrow already exists: {0}")]
    DuplicateName(String),
}

/// Errors from reading the bootstrap file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read burrows file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid burrows file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from writing the shutdown dump or the periodic report.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot write artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot encode artifact: {0}")]
    Encode(#[from] serde_json::Error),
}
