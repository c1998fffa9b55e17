//! # System Lifecycle & Orchestration
//!
//! Everything that turns a [`PoolManager`](crate::pool_manager::PoolManager) into
//! a running service: startup, the initial load, periodic reports and the
//! coordinated shutdown.
//!
//! ## Main Components
//!
//! - [`BurrowSystem`] - starts the pool and owns its shutdown trigger
//! - [`shutdown`] - the `watch`-based cancellation signal shared by every task
//! - [`bootstrap`] - reads the initial burrows file and feeds the pool
//! - [`reporter`] - writes the aggregate report on a fixed interval
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure
//!
//! ## Shutdown Order
//!
//! ```text
//! ctrl-c ─► BurrowSystem::shutdown ─► trigger=true
//!              ├─► bootstrap producer stops feeding
//!              ├─► report writer stops
//!              └─► control loop: Close every actor ─► dump file ─► done
//! ```

pub mod bootstrap;
pub mod burrow_system;
pub mod reporter;
pub mod shutdown;
pub mod tracing;

pub use burrow_system::*;
pub use self::tracing::*;
