//! File-backed durable record store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use dotdns_core::error::{CoreError, CoreResult};
use dotdns_core::traits::RecordStore;

/// One `<name>.json` file per record inside a data directory.
///
/// Writes go to a sibling temp file that is flushed to disk and then renamed
/// over the target, so readers see either the old bytes or the new bytes and
/// a failed write leaves the previous record intact.
///
/// Records carry provider secrets. On unix, record files are created `0600`
/// and a data directory created here is `0700`.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    dir: PathBuf,
}

impl FileRecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding record `name`.
    pub fn record_path(&self, name: &str) -> CoreResult<PathBuf> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(CoreError::ValidationError(format!(
                "Invalid record name: {name:?}"
            )));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }

    fn storage_error(action: &str, path: &Path, e: &std::io::Error) -> CoreError {
        CoreError::StorageError(format!("Failed to {action} {}: {e}", path.display()))
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn read(&self, name: &str) -> CoreResult<Option<Vec<u8>>> {
        let path = self.record_path(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::storage_error("read", &path, &e)),
        }
    }

    async fn write(&self, name: &str, bytes: &[u8]) -> CoreResult<()> {
        let path = self.record_path(name)?;
        let tmp = path.with_extension("json.tmp");

        let mut dir_builder = tokio::fs::DirBuilder::new();
        dir_builder.recursive(true);
        #[cfg(unix)]
        dir_builder.mode(0o700);
        dir_builder
            .create(&self.dir)
            .await
            .map_err(|e| Self::storage_error("create", &self.dir, &e))?;

        // a leftover temp file would keep its old mode
        if let Err(e) = tokio::fs::remove_file(&tmp).await {
            if e.kind() != ErrorKind::NotFound {
                log::debug!("Stale {} not removed: {e}", tmp.display());
            }
        }

        let result = async {
            let mut options = tokio::fs::OpenOptions::new();
            options.write(true).create_new(true);
            #[cfg(unix)]
            options.mode(0o600);
            let mut file = options.open(&tmp).await?;
            file.write_all(bytes).await?;
            file.flush().await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp, &path).await
        }
        .await;

        if let Err(e) = result {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    log::warn!("Failed to remove {}: {cleanup}", tmp.display());
                }
            }
            log::error!("Writing record {name} failed: {e}");
            return Err(Self::storage_error("write", &path, &e));
        }

        log::debug!("Wrote record {name} ({} bytes)", bytes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_names_are_restricted() {
        let store = FileRecordStore::new("/tmp/dotdns");
        assert!(store.record_path("stored_providers").is_ok());
        for bad in ["", "../etc/passwd", "a/b", "a.b", "name with space"] {
            assert!(store.record_path(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn records_live_in_data_dir() {
        let store = FileRecordStore::new("/tmp/dotdns");
        assert_eq!(
            store.record_path("stored_providers").unwrap(),
            PathBuf::from("/tmp/dotdns/stored_providers.json")
        );
    }
}
