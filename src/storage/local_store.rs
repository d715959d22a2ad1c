//! Local filesystem blob storage implementation

use crate::storage::{BlobStore, StoreError};
use crate::storage::config::StorageConfig;
use crate::video::VideoId;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use log::{debug, info, warn};

/// Stores each video payload as `<base_path>/video<id>.mpg`
pub struct LocalFileBlobStore {
    storage_path: PathBuf,
    temp_path: PathBuf,
    // Keeps staging names unique when two saves for one id overlap
    staging_seq: AtomicU64,
}

impl LocalFileBlobStore {
    /// Create the store, creating its directories if they do not exist
    pub fn new(config: &StorageConfig) -> io::Result<Self> {
        Self::with_paths(&config.base_path, &config.temp_path)
    }

    pub fn with_paths(storage_path: impl AsRef<Path>, temp_path: impl AsRef<Path>) -> io::Result<Self> {
        let storage_path = storage_path.as_ref().to_path_buf();
        let temp_path = temp_path.as_ref().to_path_buf();

        if !storage_path.exists() {
            fs::create_dir_all(&storage_path)?;
            info!("Created storage directory: {}", storage_path.display());
        }
        if !temp_path.exists() {
            fs::create_dir_all(&temp_path)?;
            info!("Created temp directory: {}", temp_path.display());
        }

        Ok(Self {
            storage_path,
            temp_path,
            staging_seq: AtomicU64::new(0),
        })
    }

    /// Get the file path holding the payload for a video
    fn video_file_path(&self, id: VideoId) -> PathBuf {
        self.storage_path.join(format!("video{}.mpg", id))
    }

    /// Get a fresh staging path used while a payload is being written
    fn staging_file_path(&self, id: VideoId) -> PathBuf {
        let seq = self.staging_seq.fetch_add(1, Ordering::Relaxed);
        self.temp_path.join(format!("video{}.{}.part", id, seq))
    }

    fn write_staged(path: &Path, reader: &mut dyn Read) -> io::Result<u64> {
        let mut writer = BufWriter::new(File::create(path)?);
        let size = io::copy(reader, &mut writer)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(size)
    }
}

impl BlobStore for LocalFileBlobStore {
    fn save(&self, id: VideoId, reader: &mut dyn Read) -> Result<u64, StoreError> {
        let staging = self.staging_file_path(id);

        let size = match Self::write_staged(&staging, reader) {
            Ok(size) => size,
            Err(e) => {
                warn!("Failed to stage data for video {}: {}", id, e);
                let _ = fs::remove_file(&staging);
                return Err(StoreError::Io(e));
            }
        };

        // Rename is atomic on one filesystem, readers see the old or the new payload
        if let Err(e) = fs::rename(&staging, self.video_file_path(id)) {
            let _ = fs::remove_file(&staging);
            return Err(StoreError::Io(e));
        }

        info!("Stored {} bytes for video {}", size, id);
        Ok(size)
    }

    fn copy_out(&self, id: VideoId, sink: &mut dyn Write) -> Result<u64, StoreError> {
        let mut file = match File::open(self.video_file_path(id)) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StoreError::NotFound(id)),
            Err(e) => return Err(StoreError::Io(e)),
        };

        let size = io::copy(&mut file, sink)?;
        debug!("Copied {} bytes for video {}", size, id);
        Ok(size)
    }
}
