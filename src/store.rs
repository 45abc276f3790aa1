use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::Snapshot;
use crate::utils::error::AppError;
use crate::Result;

/// JSON file holding the last-seen snapshot. Not locked; concurrent runs race
/// and the last writer wins.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file means an empty snapshot; a malformed one is fatal.
    pub async fn load(&self) -> Result<Snapshot> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No snapshot yet, starting empty");
                return Ok(Snapshot::new());
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: Snapshot =
            serde_json::from_str(&contents).map_err(|source| AppError::StateCorrupt {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), entries = snapshot.len(), "Loaded snapshot");
        Ok(snapshot)
    }

    /// Overwrites the file with `snapshot`, even when it is empty.
    pub async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let contents = serde_json::to_string_pretty(snapshot)?;
        tokio::fs::write(&self.path, contents).await?;

        debug!(path = %self.path.display(), entries = snapshot.len(), "Saved snapshot");
        Ok(())
    }
}
