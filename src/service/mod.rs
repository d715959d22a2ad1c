//service/mod.rs
pub mod request_context;
pub mod video_service;

use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use bytes::BytesMut;
use futures::StreamExt;
use log::{debug, info, warn};

use crate::app_state::AppState;
use crate::error::VideoError;
use crate::service::request_context::RequestContext;
use crate::video::{Video, VideoId};

/// Multipart field carrying the raw video bytes
pub const DATA_FIELD: &str = "data";

pub async fn list_videos_service(app_state: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let videos = app_state.video_service.list_videos();
    debug!("Listing {} videos", videos.len());
    Ok(HttpResponse::Ok().json(videos))
}

pub async fn create_video_service(video: Video, req: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let context = RequestContext::from_request(&req, app_state.config.server.public_base_url.as_deref());
    debug!("Create video called with base url: {}", context.base_url);

    let stored = app_state.video_service.create_video(video, &context.base_url);
    Ok(HttpResponse::Ok().json(stored))
}

pub async fn upload_data_service(id: VideoId, mut payload: Multipart, app_state: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let _mdc = log_mdc::insert_scoped("video_id", id.to_string());

    // Reject unknown ids before consuming the body
    app_state.video_service.get_video(id)?;

    let limit = app_state.config.server.max_payload_size;
    let mut data: Option<BytesMut> = None;

    while let Some(field) = payload.next().await {
        let mut field = field?;
        // Only the first `data` part is stored, later ones are drained like any other field
        if field.name() != Some(DATA_FIELD) || data.is_some() {
            debug!("Skipping multipart field {:?}", field.name());
            while let Some(chunk) = field.next().await {
                chunk.map_err(|e| VideoError::Unreadable(e.to_string()))?;
            }
            continue;
        }

        let mut bytes = BytesMut::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| {
                warn!("Error reading upload for video {}: {}", id, e);
                VideoError::Unreadable(e.to_string())
            })?;
            if (bytes.len() + chunk.len()) as u64 > limit {
                warn!("Upload for video {} exceeds limit of {} bytes", id, limit);
                return Err(VideoError::TooLarge(limit).into());
            }
            bytes.extend_from_slice(&chunk);
        }
        data = Some(bytes);
    }

    let data = data.ok_or(VideoError::MissingField(DATA_FIELD))?;
    info!("Total received data size: {} bytes", data.len());

    let status = app_state.video_service.upload_data(id, &data)?;
    Ok(HttpResponse::Ok().json(status))
}

pub async fn get_data_service(id: VideoId, app_state: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let _mdc = log_mdc::insert_scoped("video_id", id.to_string());

    let video_data = app_state.video_service.download_data(id)?;
    info!("Serving {} bytes for video {}", video_data.data.len(), id);

    Ok(HttpResponse::Ok()
        .content_type(video_data.content_type)
        .insert_header((header::ETAG, format!("\"{}\"", video_data.checksum)))
        .body(video_data.data))
}
