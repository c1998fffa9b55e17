use crate::clients::BurrowPool;
use crate::framework::PoolConfig;
use crate::pool_manager::PoolManager;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

use super::shutdown::shutdown_channel;

/// The runtime orchestrator of a burrow pool.
///
/// `BurrowSystem` is responsible for:
/// - **Lifecycle Management**: starting the pool manager and stopping it
/// - **Shutdown Coordination**: owning the trigger every background task listens to
///
/// # Example
///
/// ```ignore
/// let system = BurrowSystem::start(PoolConfig::default());
///
/// system.pool.admit(Burrow::new("Burrow 1", 2.5, 1.2, 10)).await?;
/// let burrow = system.pool.rentout(Duration::from_secs(3)).await?;
///
/// // Closes every actor and writes the dump file
/// system.shutdown().await;
/// ```
pub struct BurrowSystem {
    /// Client for interacting with the pool
    pub pool: PoolManager,

    trigger: watch::Sender<bool>,
}

impl BurrowSystem {
    /// Starts a pool manager wired to a fresh shutdown signal.
    pub fn start(config: PoolConfig) -> Self {
        let (trigger, signal) = shutdown_channel();
        let pool = PoolManager::new(config, signal);
        info!("Burrow system started");
        Self { pool, trigger }
    }

    /// A receiver of the shutdown signal for background tasks.
    pub fn signal(&self) -> watch::Receiver<bool> {
        self.trigger.subscribe()
    }

    /// The pool as the capability trait collaborators depend on.
    pub fn shared_pool(&self) -> Arc<dyn BurrowPool> {
        Arc::new(self.pool.clone())
    }

    /// Gracefully shuts down the pool.
    ///
    /// Raises the shutdown signal, then waits until the control loop has closed
    /// every actor and written the dump file.
    pub async fn shutdown(self) {
        info!("Shutting down system...");
        self.trigger.send_replace(true);
        self.pool.done().await;
        info!("System shutdown complete.");
    }
}
