//! # Periodic Report Writer
//!
//! Rewrites a tabular report file on a fixed interval until shutdown. A failed
//! write is logged and retried on the next interval.

use crate::clients::BurrowPool;
use crate::framework::ArtifactError;
use crate::model::Report;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::shutdown::cancelled;

/// Writes `report` to `path`, replacing any previous content.
pub async fn write_report(path: &Path, report: &Report) -> Result<(), ArtifactError> {
    let mut table = Vec::new();
    report.write_table(&mut table)?;
    tokio::fs::write(path, table).await?;
    Ok(())
}

/// Spawns the writer task. The first report is written one `interval` after
/// the start.
pub fn spawn_report_writer(
    pool: Arc<dyn BurrowPool>,
    path: PathBuf,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let interval = interval.max(Duration::from_millis(1));

    tokio::spawn(async move {
        let mut every = time::interval_at(Instant::now() + interval, interval);
        every.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancelled(&mut shutdown) => break,
                _ = every.tick() => {
                    let report = pool.report().await;
                    match write_report(&path, &report).await {
                        Ok(()) => info!(path = %path.display(), "Report written"),
                        Err(e) => warn!(path = %path.display(), error = %e, "Report not written"),
                    }
                }
            }
        }

        debug!("Report writer stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockPool;
    use crate::lifecycle::shutdown::shutdown_channel;
    use crate::model::Burrow;

    #[tokio::test]
    async fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let report = Report::from_burrows(&vec![Burrow::new("Burrow 1", 2.5, 1.2, 10)]);

        write_report(&path, &report).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(".....TotalDepth|..........2.500|"));
        assert!(text.contains("...NumAvailable|..............1|"));
        assert!(text.contains("..VolumeMaxName|.......Burrow 1|"));
    }

    #[tokio::test]
    async fn test_writer_runs_until_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let pool = Arc::new(MockPool::with_burrows(vec![
            Burrow::new("A", 1.0, 1.0, 0),
            Burrow::new("B", 2.0, 1.0, 0).occupied(),
        ]));
        let (trigger, signal) = shutdown_channel();

        let writer = spawn_report_writer(pool, path.clone(), Duration::from_millis(20), signal);
        time::sleep(Duration::from_millis(100)).await;
        trigger.send(true).unwrap();
        writer.await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains(".....TotalDepth|..........3.000|"));
        assert!(text.contains("...NumAvailable|..............1|"));
    }

    #[tokio::test]
    async fn test_write_failure_keeps_writer_alive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.txt");
        let (trigger, signal) = shutdown_channel();

        let writer = spawn_report_writer(
            Arc::new(MockPool::new()),
            path,
            Duration::from_millis(10),
            signal,
        );
        time::sleep(Duration::from_millis(50)).await;
        assert!(!writer.is_finished());

        trigger.send(true).unwrap();
        writer.await.unwrap();
    }
}
