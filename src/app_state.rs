//! Application State Management
//!
//! This module provides the application state that contains all services
//! and their dependencies, following the dependency injection pattern.

use std::sync::Arc;
use actix_web::web;
use log::info;

use crate::config::AppConfig;
use crate::registry::Registry;
use crate::service::video_service::VideoService;
use crate::storage::BlobStore;
use crate::storage::memory_store::MemoryBlobStore;

/// Application state containing all services and their dependencies
#[derive(Clone)]
pub struct AppState {
    pub video_service: Arc<VideoService>,
    pub config: AppConfig,
}

impl AppState {
    /// Create application state from configuration
    pub fn from_config(config: AppConfig) -> std::io::Result<Self> {
        info!("Initializing application state with configuration");

        let store = config.storage.create_store()?;
        let state = Self::with_store(config, store);

        info!("Application state initialized successfully");
        Ok(state)
    }

    /// Create application state around an already built blob store
    pub fn with_store(config: AppConfig, store: Arc<dyn BlobStore>) -> Self {
        let registry = Arc::new(Registry::new());
        let video_service = Arc::new(VideoService::new(registry, store));
        Self { video_service, config }
    }

    /// Create application state for testing with an in-memory blob store
    pub fn new_for_testing() -> Self {
        Self::with_store(AppConfig::default(), Arc::new(MemoryBlobStore::new()))
    }

    /// JSON extractor configuration honouring the payload size limit
    pub fn json_config(&self) -> web::JsonConfig {
        web::JsonConfig::default().limit(self.config.server.max_payload_size as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use tempfile::TempDir;

    #[test]
    fn test_new_for_testing_starts_empty() {
        let state = AppState::new_for_testing();
        assert!(state.video_service.list_videos().is_empty());
        assert!(state.video_service.registry().is_empty());
    }

    #[test]
    fn test_from_config_with_local_store() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Local;
        config.storage.base_path = dir.path().join("videos").to_string_lossy().into_owned();
        config.storage.temp_path = dir.path().join("temp").to_string_lossy().into_owned();

        let state = AppState::from_config(config).unwrap();
        let video = state.video_service.create_video(crate::video::Video::with_title("a"), "http://localhost:8080");
        state.video_service.upload_data(video.id, b"abc").unwrap();
        assert!(dir.path().join("videos").join("video1.mpg").is_file());
    }

    #[test]
    fn test_clones_share_services() {
        let state = AppState::new_for_testing();
        let clone = state.clone();
        state.video_service.create_video(crate::video::Video::with_title("shared"), "http://h");
        assert_eq!(clone.video_service.list_videos().len(), 1);
    }
}
