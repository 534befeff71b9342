use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use actix_web::{web, HttpResponse};
use sha2::{Digest, Sha256};

use crate::config::settings::ApplicationSettings;
use crate::error::ApiError;
use crate::models::common::ApiResponse;
use crate::models::upload::{
    file_extension, is_allowed_image, ImageUploadForm, UploadCategory, UploadResponse,
    ALLOWED_IMAGE_EXTENSIONS,
};

fn validate_file(temp_file: &TempFile, category: UploadCategory) -> Result<String, ApiError> {
    let file_name = temp_file
        .file_name
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("Uploaded file has no name".to_string()))?;

    if !is_allowed_image(file_name) {
        return Err(ApiError::BadRequest(format!(
            "File type not allowed. Supported types: {}",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )));
    }

    if temp_file.size == 0 {
        return Err(ApiError::BadRequest("File is empty".to_string()));
    }
    if temp_file.size as u64 > category.max_size() {
        return Err(ApiError::BadRequest(format!(
            "File size exceeds maximum limit of {}MB",
            category.max_size() / 1024 / 1024
        )));
    }

    Ok(file_extension(file_name))
}

fn calculate_file_hash(file_path: &Path) -> Result<String, std::io::Error> {
    let mut file = fs::File::open(file_path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0; 8192];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Copies the temp file to `<upload_dir>/<category>/<sha256>.<ext>` and
/// returns its public URL. Identical content maps to the same stored file.
fn store_image(
    form: ImageUploadForm,
    category: UploadCategory,
    settings: &ApplicationSettings,
) -> Result<UploadResponse, ApiError> {
    let extension = validate_file(&form.file, category)?;

    let directory = PathBuf::from(&settings.upload_dir).join(category.directory());
    fs::create_dir_all(&directory)
        .map_err(|e| ApiError::Internal(format!("Failed to create upload directory: {}", e)))?;

    let file_hash = calculate_file_hash(form.file.file.path())
        .map_err(|e| ApiError::Internal(format!("Failed to hash uploaded file: {}", e)))?;

    let file_name = format!("{}.{}", file_hash, extension);
    let file_path = directory.join(&file_name);

    if file_path.exists() {
        tracing::info!("Reusing stored {} upload {}", category.directory(), file_path.display());
    } else {
        // Copy instead of persist so the temp dir may live on another device
        fs::copy(form.file.file.path(), &file_path)
            .map_err(|e| ApiError::Internal(format!("Failed to save uploaded file: {}", e)))?;
        tracing::info!("Saved {} upload {}", category.directory(), file_path.display());
    }

    Ok(UploadResponse {
        file_url: format!("/uploads/{}/{}", category.directory(), file_name),
        file_name,
    })
}

// POST /admin/upload/team-logo
#[tracing::instrument(
    name = "Upload team logo",
    skip(form, settings),
    fields(file_name = %form.file.file_name.as_deref().unwrap_or("unknown"))
)]
pub async fn upload_team_logo(
    MultipartForm(form): MultipartForm<ImageUploadForm>,
    settings: web::Data<ApplicationSettings>,
) -> Result<HttpResponse, ApiError> {
    let uploaded = store_image(form, UploadCategory::TeamLogo, &settings)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Team logo uploaded successfully", uploaded)))
}

// POST /admin/upload/player-avatar
#[tracing::instrument(
    name = "Upload player avatar",
    skip(form, settings),
    fields(file_name = %form.file.file_name.as_deref().unwrap_or("unknown"))
)]
pub async fn upload_player_avatar(
    MultipartForm(form): MultipartForm<ImageUploadForm>,
    settings: web::Data<ApplicationSettings>,
) -> Result<HttpResponse, ApiError> {
    let uploaded = store_image(form, UploadCategory::PlayerAvatar, &settings)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Player avatar uploaded successfully", uploaded)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_hex_sha256_of_contents() {
        let path = std::env::temp_dir().join(format!("hash-{}.bin", uuid::Uuid::new_v4()));
        fs::write(&path, b"abc").unwrap();

        let hash = calculate_file_hash(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(hash, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }
}
