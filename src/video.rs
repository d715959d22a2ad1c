//! video.rs
//!
//! Video data model shared by the registry, the service layer and the HTTP API.

use serde::{Deserialize, Deserializer, Serialize};

/// Video identifier type. Zero means "not assigned yet".
pub type VideoId = u64;

/// Descriptive record for a video, including its computed download URL.
///
/// Missing keys and explicit `null`s both deserialize to the field default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Video {
    /// Server-assigned identifier, always > 0 once stored
    #[serde(deserialize_with = "null_as_default")]
    pub id: VideoId,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Duration in seconds
    #[serde(deserialize_with = "null_as_default")]
    pub duration: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    /// MIME type of the raw video data, e.g. `video/mp4`
    #[serde(deserialize_with = "null_as_default")]
    pub content_type: String,
    /// Absolute URL of the data endpoint for this video
    #[serde(deserialize_with = "null_as_default")]
    pub data_url: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Video {
    /// Create an unregistered video with only a title set
    pub fn with_title(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    /// Build the absolute data URL for `id` under `base_url`
    pub fn data_url_for(base_url: &str, id: VideoId) -> String {
        format!("{}/video/{}/data", base_url.trim_end_matches('/'), id)
    }
}

/// Processing state reported after an upload
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum VideoState {
    Processing,
    Ready,
}

/// Transient upload result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoStatus {
    pub state: VideoState,
}

impl VideoStatus {
    pub fn new(state: VideoState) -> Self {
        Self { state }
    }
}

/// Lifecycle of a registered video. Ids absent from the registry are unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoLifecycle {
    /// Metadata stored, no data uploaded successfully yet
    Registered,
    /// At least one upload completed
    Ready,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_video_deserializes_partial_payload() {
        let video: Video = serde_json::from_value(json!({"title": "a"})).unwrap();
        assert_eq!(video.id, 0);
        assert_eq!(video.title, "a");
        assert_eq!(video.data_url, "");
    }

    #[test]
    fn test_video_accepts_null_fields() {
        let video: Video = serde_json::from_value(json!({
            "id": null,
            "title": "a",
            "duration": null,
            "location": null,
            "subject": null,
            "contentType": null,
            "dataUrl": null
        }))
        .unwrap();
        assert_eq!(video, Video::with_title("a"));
    }

    #[test]
    fn test_video_uses_camel_case_fields() {
        let video = Video {
            id: 3,
            content_type: "video/mp4".to_string(),
            data_url: "http://localhost:8080/video/3/data".to_string(),
            ..Video::with_title("clip")
        };
        let value = serde_json::to_value(&video).unwrap();
        assert_eq!(value["contentType"], "video/mp4");
        assert_eq!(value["dataUrl"], "http://localhost:8080/video/3/data");
        assert!(value.get("data_url").is_none());
    }

    #[test]
    fn test_data_url_for_trims_trailing_slash() {
        assert_eq!(Video::data_url_for("http://localhost:8080/", 7), "http://localhost:8080/video/7/data");
        assert_eq!(Video::data_url_for("http://example.com", 1), "http://example.com/video/1/data");
    }

    #[test]
    fn test_video_status_serializes_uppercase() {
        let status = VideoStatus::new(VideoState::Ready);
        assert_eq!(serde_json::to_string(&status).unwrap(), r#"{"state":"READY"}"#);
        let processing: VideoStatus = serde_json::from_str(r#"{"state":"PROCESSING"}"#).unwrap();
        assert_eq!(processing.state, VideoState::Processing);
    }
}
