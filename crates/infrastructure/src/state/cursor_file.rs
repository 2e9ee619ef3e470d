use async_trait::async_trait;
use pihole_exporter_application::ports::CursorStore;
use pihole_exporter_domain::ExporterError;
use std::path::PathBuf;
use tracing::{info, warn};

/// Ship cursor persisted as a single unix timestamp in a state file.
///
/// Writes go to a sibling temp file followed by a rename, so a crash
/// mid-write can never truncate the cursor. A missing or corrupt file
/// is treated as "no prior state" and falls back to
/// `now - initial backfill window`.
pub struct FileCursorStore {
    path: PathBuf,
    backfill_secs: i64,
}

impl FileCursorStore {
    pub fn new(path: impl Into<PathBuf>, backfill_minutes: u64) -> Self {
        Self {
            path: path.into(),
            backfill_secs: backfill_minutes as i64 * 60,
        }
    }

    fn fallback(&self) -> i64 {
        chrono::Utc::now().timestamp() - self.backfill_secs
    }

    fn temp_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(".tmp");
        PathBuf::from(path)
    }
}

#[async_trait]
impl CursorStore for FileCursorStore {
    async fn load(&self) -> i64 {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => match contents.trim().parse::<i64>() {
                Ok(timestamp) => timestamp,
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "corrupt cursor file, falling back to backfill window"
                    );
                    self.fallback()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    path = %self.path.display(),
                    "no cursor file, starting from backfill window"
                );
                self.fallback()
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "unreadable cursor file, falling back to backfill window"
                );
                self.fallback()
            }
        }
    }

    async fn advance(&self, to: i64) -> Result<(), ExporterError> {
        let temp = self.temp_path();
        tokio::fs::write(&temp, to.to_string())
            .await
            .map_err(|e| {
                ExporterError::Persistence(format!(
                    "writing cursor temp file {}: {e}",
                    temp.display()
                ))
            })?;
        tokio::fs::rename(&temp, &self.path).await.map_err(|e| {
            ExporterError::Persistence(format!(
                "committing cursor file {}: {e}",
                self.path.display()
            ))
        })
    }
}
