//! Best-effort dump of the final burrow snapshots written on shutdown.

use crate::framework::ArtifactError;
use crate::model::Burrow;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Writes `burrows` as a JSON array to a timestamped file in `dir`.
pub async fn write_dump(dir: &Path, burrows: &[Burrow]) -> Result<PathBuf, ArtifactError> {
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
    let path = dir.join(format!("dump_{stamp}.json"));

    let body = serde_json::to_vec_pretty(burrows)?;
    tokio::fs::write(&path, body).await?;
    Ok(path)
}
