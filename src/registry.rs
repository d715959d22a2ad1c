//! registry.rs
//!
//! In-memory video registry.
//!
//! The registry owns identifier assignment and data-URL computation. It is
//! created once per application and shared through `AppState`; nothing here
//! survives a restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use log::{debug, warn};

use crate::video::{Video, VideoId, VideoLifecycle};

struct Entry {
    video: Video,
    lifecycle: VideoLifecycle,
}

/// Registry of video metadata keyed by server-assigned id
pub struct Registry {
    /// Last id handed out; the next one is `last_id + 1`
    last_id: AtomicU64,
    videos: RwLock<HashMap<VideoId, Entry>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            last_id: AtomicU64::new(0),
            videos: RwLock::new(HashMap::new()),
        }
    }

    /// All stored videos, ordered by id
    pub fn list(&self) -> Vec<Video> {
        let videos = self.videos.read().unwrap_or_else(PoisonError::into_inner);
        let mut list: Vec<Video> = videos.values().map(|entry| entry.video.clone()).collect();
        list.sort_by_key(|video| video.id);
        list
    }

    /// Store `candidate`, assigning an id when it has none and computing its
    /// data URL under `base_url`. An explicit id replaces any record with that
    /// id and moves the counter past it. Returns the stored record.
    pub fn create(&self, mut candidate: Video, base_url: &str) -> Video {
        // Held across id assignment so an explicit id and an auto id cannot interleave
        let mut videos = self.videos.write().unwrap_or_else(PoisonError::into_inner);
        if candidate.id == 0 {
            candidate.id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        } else {
            // Auto-assigned ids must never land on a client-chosen one
            self.last_id.fetch_max(candidate.id, Ordering::SeqCst);
        }
        candidate.data_url = Video::data_url_for(base_url, candidate.id);

        let previous = videos.insert(
            candidate.id,
            Entry {
                video: candidate.clone(),
                lifecycle: VideoLifecycle::Registered,
            },
        );
        if previous.is_some() {
            warn!("Replaced existing video record with id: {}", candidate.id);
        } else {
            debug!("Registered video id: {}, data_url: {}", candidate.id, candidate.data_url);
        }
        candidate
    }

    pub fn get(&self, id: VideoId) -> Option<Video> {
        let videos = self.videos.read().unwrap_or_else(PoisonError::into_inner);
        videos.get(&id).map(|entry| entry.video.clone())
    }

    pub fn contains(&self, id: VideoId) -> bool {
        let videos = self.videos.read().unwrap_or_else(PoisonError::into_inner);
        videos.contains_key(&id)
    }

    /// Lifecycle of `id`, or `None` when the id is unknown
    pub fn lifecycle(&self, id: VideoId) -> Option<VideoLifecycle> {
        let videos = self.videos.read().unwrap_or_else(PoisonError::into_inner);
        videos.get(&id).map(|entry| entry.lifecycle)
    }

    /// Move a registered video to `Ready`. Returns false when the id is unknown.
    pub fn mark_ready(&self, id: VideoId) -> bool {
        let mut videos = self.videos.write().unwrap_or_else(PoisonError::into_inner);
        match videos.get_mut(&id) {
            Some(entry) => {
                entry.lifecycle = VideoLifecycle::Ready;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.videos.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
