//! # Bootstrap Loader
//!
//! Reads the initial burrows from a JSON array on disk and streams them into the
//! pool. The producer side stops as soon as shutdown is requested; the consumer
//! side is [`PoolManager::load`].

use crate::framework::LoadError;
use crate::model::Burrow;
use crate::pool_manager::PoolManager;
use std::path::Path;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use super::shutdown::cancelled;

/// Parses the burrows file.
///
/// ```json
/// [
///   { "name": "Burrow 1", "occupied": false, "depth": 2.5, "width": 1.2, "age": 10 }
/// ]
/// ```
pub async fn read_burrows(path: impl AsRef<Path>) -> Result<Vec<Burrow>, LoadError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let burrows: Vec<Burrow> = serde_json::from_slice(&bytes)?;
    debug!(path = %path.display(), count = burrows.len(), "Read burrows file");
    Ok(burrows)
}

/// Admits `burrows` one by one through a streaming channel and returns how many
/// were accepted. Stops early once `shutdown` fires.
pub async fn feed(
    pool: &PoolManager,
    burrows: Vec<Burrow>,
    mut shutdown: watch::Receiver<bool>,
) -> usize {
    let (sender, receiver) = mpsc::channel(1);

    let producer = tokio::spawn(async move {
        for burrow in burrows {
            tokio::select! {
                _ = cancelled(&mut shutdown) => {
                    debug!("Bootstrap interrupted by shutdown");
                    return;
                }
                sent = sender.send(burrow) => {
                    if sent.is_err() {
                        return;
                    }
                }
            }
        }
    });

    let admitted = pool.load(receiver).await;
    let _ = producer.await;
    info!(count = admitted, "Initial burrows loaded");
    admitted
}
