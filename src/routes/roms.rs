use crate::{catalog::Catalog, config::Config, errors::ApiError, models::rom::RomEntry};
use actix_web::{HttpResponse, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct ListResp {
    pub success: bool,
    pub roms: Vec<RomEntry>,
}

pub async fn list_roms(cfg: web::Data<Config>) -> Result<HttpResponse, ApiError> {
    let roms = Catalog::new(cfg.upload_dir()).list()?;
    Ok(HttpResponse::Ok().json(ListResp { success: true, roms }))
}

#[derive(Deserialize)]
pub struct LoadRomReq {
    pub filename: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadRomResp {
    pub success: bool,
    pub rom_data: String,
    pub filename: String,
}

pub async fn load_rom(
    cfg: web::Data<Config>,
    body: web::Json<LoadRomReq>,
) -> Result<HttpResponse, ApiError> {
    let filename = body
        .into_inner()
        .filename
        .filter(|f| !f.is_empty())
        .ok_or(ApiError::BadRequest("Filename is required".into()))?;
    let data = Catalog::new(cfg.upload_dir()).load(&filename)?;
    Ok(HttpResponse::Ok().json(LoadRomResp {
        success: true,
        rom_data: STANDARD.encode(data),
        filename,
    }))
}

pub async fn delete_rom(
    cfg: web::Data<Config>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let filename = path.into_inner();
    Catalog::new(cfg.upload_dir()).delete(&filename)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "ROM deleted successfully",
    })))
}
