use std::path::PathBuf;

use actix_web::{web, HttpResponse};

use crate::config::settings::ApplicationSettings;
use crate::error::ApiError;
use crate::models::upload::{content_type_for, is_safe_file_name, UploadCategory};

/// Serves `/uploads/{category}/{file}` from the upload directory.
#[tracing::instrument(name = "Serve uploaded image", skip(settings))]
pub async fn serve_upload(
    path: web::Path<(String, String)>,
    settings: web::Data<ApplicationSettings>,
) -> Result<HttpResponse, ApiError> {
    let (category, file_name) = path.into_inner();

    let Some(category) = UploadCategory::from_directory(&category) else {
        return Err(ApiError::NotFound("File not found".to_string()));
    };
    if !is_safe_file_name(&file_name) {
        tracing::warn!("Directory traversal attempt detected: {}", file_name);
        return Err(ApiError::BadRequest("Invalid filename".to_string()));
    }

    let file_path = PathBuf::from(&settings.upload_dir)
        .join(category.directory())
        .join(&file_name);

    match web::block(move || std::fs::read(file_path)).await {
        Ok(Ok(contents)) => Ok(HttpResponse::Ok()
            .content_type(content_type_for(&file_name))
            .body(contents)),
        Ok(Err(_)) | Err(_) => Err(ApiError::NotFound("File not found".to_string())),
    }
}
