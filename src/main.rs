use std::io;
use std::path::Path;

use actix_web::{App, HttpServer, web};
use log::{info, warn};

use video_depot::api;
use video_depot::app_state::AppState;
use video_depot::config::AppConfig;

fn init_logging(config: &AppConfig) {
    let log_config = &config.logging.config_file;
    if Path::new(log_config).exists() {
        match log4rs::init_file(log_config, Default::default()) {
            Ok(()) => return,
            Err(e) => eprintln!("Failed to load log config {}: {}, falling back to env_logger", log_config, e),
        }
    }
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    warn!("Log config {} not loaded, logging with env_logger", log_config);
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = AppConfig::load().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    init_logging(&config);

    let app_state = AppState::from_config(config)?;
    let (host, port) = app_state.config.bind_address();
    let workers = app_state.config.server.workers;
    info!("Starting server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(web::Data::new(app_state.clone()))
            .app_data(app_state.json_config())
            .configure(api::configure)
    })
    .workers(workers)
    .bind((host.as_str(), port))?
    .run()
    .await
}
