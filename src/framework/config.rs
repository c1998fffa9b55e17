//! Runtime configuration injected into the pool manager and every burrow actor.

use std::path::PathBuf;
use std::time::Duration;

/// Settings shared by the manager and its actors.
///
/// Tests shorten `tick` and `negotiation_grace` to milliseconds instead of
/// touching any global state.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Period of the aging tick. One tick is one minute of burrow life.
    pub tick: Duration,

    /// How long an actor keeps an offer open waiting for the assignment.
    /// Independent of (and normally shorter than) any caller deadline.
    pub negotiation_grace: Duration,

    /// Bound of each actor inbox and of the manager's control channel.
    pub mailbox_capacity: usize,

    /// Directory receiving the JSON dump written on shutdown.
    pub dump_dir: PathBuf,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(60),
            negotiation_grace: Duration::from_secs(1),
            mailbox_capacity: 32,
            dump_dir: PathBuf::from("."),
        }
    }
}

impl PoolConfig {
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_negotiation_grace(mut self, grace: Duration) -> Self {
        self.negotiation_grace = grace;
        self
    }

    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity.max(1);
        self
    }

    pub fn with_dump_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dump_dir = dir.into();
        self
    }
}
