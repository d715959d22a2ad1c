//! Video service layer that coordinates the registry and the blob store

use crate::error::VideoError;
use crate::registry::Registry;
use crate::storage::BlobStore;
use crate::video::{Video, VideoId, VideoLifecycle, VideoState, VideoStatus};
use actix_web::http::header::HeaderValue;
use std::sync::Arc;
use log::{debug, info, log_enabled, warn, Level};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Raw payload of a video together with what the HTTP layer needs to serve it
#[derive(Debug, Clone, PartialEq)]
pub struct VideoData {
    pub data: Vec<u8>,
    /// MIME type to serve the payload with
    pub content_type: String,
    /// Hex MD5 of the payload
    pub checksum: String,
}

/// Video service with injected registry and blob store
pub struct VideoService {
    registry: Arc<Registry>,
    store: Arc<dyn BlobStore>,
}

impl VideoService {
    pub fn new(registry: Arc<Registry>, store: Arc<dyn BlobStore>) -> Self {
        Self { registry, store }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Calculate MD5 checksum for data
    fn calculate_checksum(data: &[u8]) -> String {
        hex::encode(md5::compute(data).0)
    }

    pub fn list_videos(&self) -> Vec<Video> {
        self.registry.list()
    }

    /// Register metadata, assigning id and data URL under `base_url`
    pub fn create_video(&self, candidate: Video, base_url: &str) -> Video {
        let video = self.registry.create(candidate, base_url);
        info!("Created video id: {}, title: {:?}", video.id, video.title);
        video
    }

    pub fn get_video(&self, id: VideoId) -> Result<Video, VideoError> {
        self.registry.get(id).ok_or(VideoError::NotFound(id))
    }

    /// Store the raw bytes for a registered video and mark it ready.
    ///
    /// On a storage failure the registry entry is left as it was.
    pub fn upload_data(&self, id: VideoId, data: &[u8]) -> Result<VideoStatus, VideoError> {
        if !self.registry.contains(id) {
            warn!("Upload rejected, unknown video id: {}", id);
            return Err(VideoError::NotFound(id));
        }

        let mut reader = data;
        let size = self.store.save(id, &mut reader).map_err(|e| {
            warn!("Failed to store data for video {}: {}", id, e);
            VideoError::from(e)
        })?;

        self.registry.mark_ready(id);
        info!("Stored {} bytes for video {}", size, id);
        if log_enabled!(Level::Debug) {
            debug!("Upload md5 for video {}: {}", id, Self::calculate_checksum(data));
        }
        Ok(VideoStatus::new(VideoState::Ready))
    }

    /// Read back the raw bytes for a registered video
    pub fn download_data(&self, id: VideoId) -> Result<VideoData, VideoError> {
        let video = self.get_video(id)?;

        let mut data = Vec::new();
        self.store.copy_out(id, &mut data).map_err(|e| {
            debug!("No readable data for video {}: {}", id, e);
            VideoError::from(e)
        })?;

        let content_type = Self::servable_content_type(id, video.content_type);
        let checksum = Self::calculate_checksum(&data);

        Ok(VideoData { data, content_type, checksum })
    }

    /// Client-declared content type if it can be sent as a header value,
    /// octet-stream otherwise
    fn servable_content_type(id: VideoId, declared: String) -> String {
        if declared.is_empty() {
            return DEFAULT_CONTENT_TYPE.to_string();
        }
        match HeaderValue::from_str(&declared) {
            Ok(_) => declared,
            Err(_) => {
                warn!("Video {} has unusable content type {:?}, serving as {}", id, declared, DEFAULT_CONTENT_TYPE);
                DEFAULT_CONTENT_TYPE.to_string()
            }
        }
    }

    /// Lifecycle of a video, `None` when the id is unknown
    pub fn lifecycle(&self, id: VideoId) -> Option<VideoLifecycle> {
        self.registry.lifecycle(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_store::MemoryBlobStore;
    use crate::storage::StoreError;
    use std::io::{self, Read, Write};

    const BASE_URL: &str = "http://localhost:8080";

    /// Store whose writes always fail, for exercising the error paths
    struct BrokenStore;

    impl BlobStore for BrokenStore {
        fn save(&self, _id: VideoId, _reader: &mut dyn Read) -> Result<u64, StoreError> {
            Err(StoreError::Io(io::Error::new(io::ErrorKind::Other, "disk full")))
        }

        fn copy_out(&self, _id: VideoId, _sink: &mut dyn Write) -> Result<u64, StoreError> {
            Err(StoreError::Io(io::Error::new(io::ErrorKind::Other, "bad sector")))
        }
    }

    fn memory_service() -> VideoService {
        VideoService::new(Arc::new(Registry::new()), Arc::new(MemoryBlobStore::new()))
    }

    #[test]
    fn test_video_service_scenario() {
        let service = memory_service();

        let a = service.create_video(Video::with_title("a"), BASE_URL);
        assert_eq!(a.id, 1);
        assert_eq!(a.data_url, "http://localhost:8080/video/1/data");
        let b = service.create_video(Video::with_title("b"), BASE_URL);
        assert_eq!(b.id, 2);

        let status = service.upload_data(1, &[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(status.state, VideoState::Ready);
        assert_eq!(service.lifecycle(1), Some(VideoLifecycle::Ready));

        let downloaded = service.download_data(1).unwrap();
        assert_eq!(downloaded.data, vec![1, 2, 3, 4, 5]);
        assert_eq!(downloaded.content_type, "application/octet-stream");
        assert_eq!(downloaded.checksum, "7cfdd07889b3295d6a550914ab35e068");

        // Registered but never uploaded
        assert!(matches!(service.download_data(2), Err(VideoError::NotFound(2))));
        assert_eq!(service.lifecycle(2), Some(VideoLifecycle::Registered));

        assert!(service.list_videos().iter().all(|v| v.id != 999));
    }

    #[test]
    fn test_upload_unknown_id_is_not_found() {
        let service = memory_service();
        assert!(matches!(service.upload_data(5, b"data"), Err(VideoError::NotFound(5))));
        assert_eq!(service.lifecycle(5), None);
        assert!(matches!(service.download_data(5), Err(VideoError::NotFound(5))));
    }

    #[test]
    fn test_download_uses_video_content_type() {
        let service = memory_service();
        let video = service.create_video(
            Video {
                content_type: "video/mp4".to_string(),
                ..Video::with_title("clip")
            },
            BASE_URL,
        );
        service.upload_data(video.id, b"").unwrap();

        let downloaded = service.download_data(video.id).unwrap();
        assert!(downloaded.data.is_empty());
        assert_eq!(downloaded.content_type, "video/mp4");
    }

    #[test]
    fn test_download_falls_back_for_invalid_content_type() {
        let service = memory_service();
        let video = service.create_video(
            Video {
                content_type: "video/mp4\n".to_string(),
                ..Video::with_title("clip")
            },
            BASE_URL,
        );
        service.upload_data(video.id, b"bytes").unwrap();

        let downloaded = service.download_data(video.id).unwrap();
        assert_eq!(downloaded.content_type, "application/octet-stream");
        assert_eq!(downloaded.data, b"bytes");
    }

    #[test]
    fn test_failed_save_keeps_registration() {
        let service = VideoService::new(Arc::new(Registry::new()), Arc::new(BrokenStore));
        let video = service.create_video(Video::with_title("a"), BASE_URL);

        let result = service.upload_data(video.id, b"bytes");
        assert!(matches!(result, Err(VideoError::Unreadable(_))));

        // No rollback: metadata stays registered
        assert_eq!(service.get_video(video.id).unwrap(), video);
        assert_eq!(service.lifecycle(video.id), Some(VideoLifecycle::Registered));

        assert!(matches!(service.download_data(video.id), Err(VideoError::Unreadable(_))));
    }
}
