//! Blob Storage Layer Abstraction
//!
//! This module provides an abstraction over the stores that keep the raw video
//! bytes, so the backend (local files, memory, ...) can be swapped without
//! touching the registry or the HTTP layer.

pub mod local_store;
pub mod memory_store;
pub mod config;


use std::io::{self, Read, Write};
use thiserror::Error;

use crate::video::VideoId;

/// Error type for blob storage operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Nothing was ever saved for this id
    #[error("no data stored for video id: {0}")]
    NotFound(VideoId),

    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Trait defining the blob storage interface
pub trait BlobStore: Send + Sync {
    /// Persist the entire `reader` stream as the payload for `id`, replacing any
    /// previous payload. Returns the number of bytes stored.
    fn save(&self, id: VideoId, reader: &mut dyn Read) -> Result<u64, StoreError>;

    /// Write the full payload for `id` to `sink`. Returns the number of bytes copied.
    fn copy_out(&self, id: VideoId, sink: &mut dyn Write) -> Result<u64, StoreError>;
}
