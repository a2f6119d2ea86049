pub mod health;
pub mod roms;
pub mod upload;

use crate::errors::ApiError;
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/upload", web::post().to(upload::upload_rom))
            .route("/load-rom", web::post().to(roms::load_rom))
            .route("/roms", web::get().to(roms::list_roms))
            .route("/roms/{filename}", web::delete().to(roms::delete_rom)),
    );
}

/// Bad JSON bodies get the same `{success, error}` envelope as everything else.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(format!("Invalid JSON body: {err}")).into())
}
