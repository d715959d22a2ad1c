// api.rs
use actix_multipart::Multipart;
use actix_web::{get, post, web, Error, HttpRequest, HttpResponse};

use crate::app_state::AppState;
use crate::service::{create_video_service, get_data_service, list_videos_service, upload_data_service};
use crate::video::{Video, VideoId};

#[get("/video")]
pub async fn list_videos(app_state: web::Data<AppState>) -> Result<HttpResponse, Error> {
    list_videos_service(app_state).await
}

#[post("/video")]
pub async fn create_video(video: web::Json<Video>, req: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, Error> {
    create_video_service(video.into_inner(), req, app_state).await
}

#[post("/video/{id}/data")]
pub async fn upload_data(id: web::Path<VideoId>, payload: Multipart, app_state: web::Data<AppState>) -> Result<HttpResponse, Error> {
    upload_data_service(id.into_inner(), payload, app_state).await
}

#[get("/video/{id}/data")]
pub async fn get_data(id: web::Path<VideoId>, app_state: web::Data<AppState>) -> Result<HttpResponse, Error> {
    get_data_service(id.into_inner(), app_state).await
}

/// Register every video route on an app or scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_videos)
        .service(create_video)
        .service(upload_data)
        .service(get_data);
}
