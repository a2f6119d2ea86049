mod catalog;
mod config;
mod errors;
mod filter;
mod identify;
mod models;
mod naming;
mod routes;
mod storage;

use actix_cors::Cors;
use actix_web::{App, HttpServer};
use crate::config::Config;
use actix_web::middleware::Logger;
use actix_web::http::header;
use actix_web::web::Data;
use env_logger::Env;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Init logger to show info by default, but can be overridden by RUST_LOG
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cfg = Config::from_env_config()?;

    log::info!("Starting server at {}, storing roms in {}", cfg.listen, cfg.uploads_dir);

    let listen_addr = cfg.listen.clone();
    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);
        if cfg.allowed_origins.is_empty() {
            cors = cors.allow_any_origin();
        }
        for origin in &cfg.allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        let mut app = App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(Data::new(cfg.clone()))
            .app_data(routes::json_config())
            .configure(routes::configure);
        if let Some(dir) = &cfg.static_dir {
            app = app.service(actix_files::Files::new("/", dir).index_file("index.html"));
        }
        app
    })
    .bind(listen_addr)?
    .run()
    .await?;
    Ok(())
}
