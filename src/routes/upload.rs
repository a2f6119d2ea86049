use crate::{config::Config, errors::ApiError, identify::identify, naming::generate_stored_name};
use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use futures_util::TryStreamExt as _;
use sanitize_filename::sanitize;

pub const ROM_FIELD: &str = "rom";

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResp {
    pub success: bool,
    pub filename: String,
    pub original_name: String,
    pub game_name: String,
    pub system: String,
    pub size: u64,
}

pub async fn upload_rom(
    cfg: web::Data<Config>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let mut saved: Option<SavedRom> = None;
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|_| ApiError::BadRequest("invalid multipart".into()))?
    {
        if field.name() != Some(ROM_FIELD) {
            while field
                .try_next()
                .await
                .map_err(|_| ApiError::BadRequest("upload read error".into()))?
                .is_some()
            {}
            continue;
        }
        saved = Some(save_rom(&cfg, field).await?);
        break;
    }
    let saved = saved.ok_or(ApiError::BadRequest("No file uploaded".into()))?;

    // the generated name carries no more than a slug, so identify from the original
    let info = identify(&saved.original_name);
    log::info!(
        "stored {} as {} ({} bytes, {} / {})",
        saved.original_name, saved.stored_name, saved.size, info.name, info.system
    );
    Ok(HttpResponse::Ok().json(UploadResp {
        success: true,
        filename: saved.stored_name,
        original_name: saved.original_name,
        game_name: info.name,
        system: info.system,
        size: saved.size,
    }))
}

pub struct SavedRom {
    pub stored_name: String,
    pub original_name: String,
    pub size: u64,
}

/// Checks the type, buffers the body up to the size limit and only then
/// writes it under a freshly generated name.
pub async fn save_rom(cfg: &Config, mut field: Field) -> Result<SavedRom, ApiError> {
    let original = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .filter(|name| !name.is_empty())
        .map(sanitize)
        .ok_or(ApiError::BadRequest("No file uploaded".into()))?;

    let policy = cfg.upload_policy();
    if !policy.accept(&original) {
        log::warn!("rejected upload {original:?}: extension not allowed");
        return Err(ApiError::BadRequest(format!(
            "Invalid file type. Allowed types: {}",
            policy.describe_allowed()
        )));
    }

    let mut data: Vec<u8> = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|_| ApiError::BadRequest("upload read error".into()))?
    {
        data.extend_from_slice(&chunk);
        if !policy.within_size(data.len()) {
            log::warn!("rejected upload {original:?}: over {} bytes", policy.max_size());
            return Err(ApiError::PayloadTooLarge(format!(
                "File too large. Maximum size is {} bytes",
                policy.max_size()
            )));
        }
    }

    let dir = cfg.upload_dir();
    dir.ensure_exists()?;
    let stored_name = generate_stored_name(&original);
    let path = dir.resolve(&stored_name).map_err(|e| {
        log::error!("generated name rejected: {e}");
        ApiError::Internal
    })?;
    dir.write_atomic(&path, &data)?;

    Ok(SavedRom {
        stored_name,
        original_name: original,
        size: data.len() as u64,
    })
}
