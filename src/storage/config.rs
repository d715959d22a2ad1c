//! Configuration for blob storage backends

use crate::storage::{BlobStore, local_store::LocalFileBlobStore, memory_store::MemoryBlobStore};
use serde::{Deserialize, Serialize};
use std::env;
use std::io;
use std::sync::Arc;
use log::{info, warn};

/// Available blob storage backends
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub enum StorageBackend {
    #[default]
    Local,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "localfs" | "fs" => Ok(StorageBackend::Local),
            "memory" | "mem" | "mock" => Ok(StorageBackend::Memory),
            _ => Err(format!("Unknown storage backend: {}", s))
        }
    }
}

/// Blob storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage backend type
    pub backend: StorageBackend,
    /// Directory holding the video payloads
    pub base_path: String,
    /// Directory for payloads still being written
    pub temp_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            base_path: "./data/videos".to_string(),
            temp_path: "./data/temp".to_string(),
        }
    }
}

impl StorageConfig {
    /// Apply the `STORAGE_BACKEND` environment override, if any
    pub fn apply_env(&mut self) {
        match env::var("STORAGE_BACKEND") {
            Ok(backend_str) => match backend_str.parse::<StorageBackend>() {
                Ok(backend) => {
                    info!("Using storage backend from environment: {:?}", backend);
                    self.backend = backend;
                }
                Err(e) => {
                    warn!("Invalid storage backend in environment: {}. Keeping {:?}.", e, self.backend);
                }
            },
            Err(_) => {
                info!("No storage backend specified in environment, using {:?}", self.backend);
            }
        }
    }

    /// Create a storage instance based on the configuration
    pub fn create_store(&self) -> io::Result<Arc<dyn BlobStore>> {
        match self.backend {
            StorageBackend::Local => {
                info!("Using local storage backend with base_path: {}, temp_path: {}",
                      self.base_path, self.temp_path);
                Ok(Arc::new(LocalFileBlobStore::new(self)?))
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage backend");
                Ok(Arc::new(MemoryBlobStore::new()))
            }
        }
    }
}
