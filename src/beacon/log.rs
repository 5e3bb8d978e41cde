//! Beacon log implementations.

use async_trait::async_trait;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::beacon::types::BeaconLogResult;
use crate::hazard::Beacon;

/// Append-only beacon store.
#[async_trait]
pub trait BeaconLog: Send + Sync {
    /// Durably record `beacon`. Either the whole record lands or none of it.
    async fn append(&self, beacon: &Beacon) -> BeaconLogResult<()>;

    /// Every stored beacon, newest first.
    async fn list_all(&self) -> BeaconLogResult<Vec<Beacon>>;
}

/// Order `beacons` (given in append order) newest first.
fn newest_first(mut beacons: Vec<Beacon>) -> Vec<Beacon> {
    beacons.reverse();
    // Stable: equal timestamps keep the later append in front.
    beacons.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    beacons
}

/// Process-local log, lost on restart.
#[derive(Default)]
pub struct MemoryBeaconLog {
    entries: Mutex<Vec<Beacon>>,
}

impl MemoryBeaconLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BeaconLog for MemoryBeaconLog {
    async fn append(&self, beacon: &Beacon) -> BeaconLogResult<()> {
        self.entries.lock().await.push(beacon.clone());
        Ok(())
    }

    async fn list_all(&self) -> BeaconLogResult<Vec<Beacon>> {
        let entries = self.entries.lock().await.clone();
        Ok(newest_first(entries))
    }
}

/// JSON-lines file log.
pub struct JsonlBeaconLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlBeaconLog {
    /// The file is created on first append.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Whether the last byte of a non-empty file of length `len` is a newline.
async fn ends_with_newline(file: &mut File, len: u64) -> std::io::Result<bool> {
    file.seek(SeekFrom::Start(len - 1)).await?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last).await?;
    Ok(last[0] == b'\n')
}

async fn write_record(file: &mut File, record: &[u8]) -> std::io::Result<()> {
    file.write_all(record).await?;
    file.flush().await
}

#[async_trait]
impl BeaconLog for JsonlBeaconLog {
    async fn append(&self, beacon: &Beacon) -> BeaconLogResult<()> {
        let mut record = serde_json::to_vec(beacon)?;
        record.push(b'\n');

        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .await?;

        let start = file.metadata().await?.len();
        // Terminate a torn tail so this record starts on its own line.
        if start > 0 && !ends_with_newline(&mut file, start).await? {
            tracing::warn!(path = %self.path.display(), "Beacon log ends mid-record, terminating it");
            record.insert(0, b'\n');
        }

        if let Err(e) = write_record(&mut file, &record).await {
            if let Err(truncate) = file.set_len(start).await {
                tracing::error!(
                    path = %self.path.display(),
                    error = %truncate,
                    "Failed to roll back partial beacon record"
                );
            }
            return Err(e.into());
        }

        tracing::debug!(beacon_id = %beacon.id, path = %self.path.display(), "Beacon appended");
        Ok(())
    }

    async fn list_all(&self) -> BeaconLogResult<Vec<Beacon>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut beacons = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Beacon>(line) {
                Ok(beacon) => beacons.push(beacon),
                Err(e) => tracing::warn!(
                    path = %self.path.display(),
                    line = index + 1,
                    error = %e,
                    "Skipping malformed beacon record"
                ),
            }
        }
        Ok(newest_first(beacons))
    }
}
