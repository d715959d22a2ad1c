//! In-memory blob storage implementation, used for tests and ephemeral runs

use crate::storage::{BlobStore, StoreError};
use crate::video::VideoId;
use log::info;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::{Mutex, PoisonError};

/// A blob store that keeps every payload in memory
pub struct MemoryBlobStore {
    storage: Mutex<HashMap<VideoId, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self {
            storage: Mutex::new(HashMap::new()),
        }
    }

    /// Clear all stored data (useful for testing)
    pub fn clear(&self) {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Number of stored payloads (useful for testing)
    pub fn object_count(&self) -> usize {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for MemoryBlobStore {
    fn save(&self, id: VideoId, reader: &mut dyn Read) -> Result<u64, StoreError> {
        // Read fully before taking the lock so a failed stream leaves the old payload
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        let size = data.len() as u64;

        self.storage
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, data);

        info!("Memory: Stored {} bytes for video {}", size, id);
        Ok(size)
    }

    fn copy_out(&self, id: VideoId, sink: &mut dyn Write) -> Result<u64, StoreError> {
        let storage = self.storage.lock().unwrap_or_else(PoisonError::into_inner);
        let data = storage.get(&id).ok_or(StoreError::NotFound(id))?;
        sink.write_all(data)?;
        Ok(data.len() as u64)
    }
}
