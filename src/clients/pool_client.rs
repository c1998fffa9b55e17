//! # BurrowPool Trait
//!
//! Everything outside the core (HTTP handlers, the bootstrap loader, the report
//! writer) talks to the pool through this trait. The production implementation
//! is [`PoolManager`](crate::pool_manager::PoolManager); tests of collaborators
//! use [`MockPool`](crate::framework::mock::MockPool) instead.

use crate::framework::{PoolError, RentError};
use crate::model::{Burrow, Report};
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait BurrowPool: Send + Sync {
    /// Admits one burrow into the pool and returns the name it is managed under.
    async fn admit(&self, burrow: Burrow) -> Result<String, PoolError>;

    /// Snapshot of every managed burrow, in no particular order.
    async fn current_status(&self) -> Vec<Burrow>;

    /// Finds one available burrow and marks it occupied, failing once
    /// `deadline` has elapsed.
    async fn rentout(&self, deadline: Duration) -> Result<Burrow, RentError>;

    /// Aggregate statistics over [`current_status`](Self::current_status).
    #[tracing::instrument(skip(self))]
    async fn report(&self) -> Report {
        let burrows = self.current_status().await;
        tracing::debug!(count = burrows.len(), "Building report");
        Report::from_burrows(&burrows)
    }
}
