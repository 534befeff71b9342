use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use serde::{Deserialize, Serialize};

pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Debug, MultipartForm)]
pub struct ImageUploadForm {
    #[multipart(limit = "5MB")]
    pub file: TempFile,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub file_url: String,
    pub file_name: String,
}

/// Where an uploaded image belongs and how large it may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadCategory {
    TeamLogo,
    PlayerAvatar,
}

impl UploadCategory {
    pub fn directory(&self) -> &'static str {
        match self {
            UploadCategory::TeamLogo => "team-logos",
            UploadCategory::PlayerAvatar => "player-avatars",
        }
    }

    pub fn max_size(&self) -> u64 {
        match self {
            UploadCategory::TeamLogo => 5 * 1024 * 1024,
            UploadCategory::PlayerAvatar => 2 * 1024 * 1024,
        }
    }

    pub fn from_directory(directory: &str) -> Option<Self> {
        match directory {
            "team-logos" => Some(UploadCategory::TeamLogo),
            "player-avatars" => Some(UploadCategory::PlayerAvatar),
            _ => None,
        }
    }
}

/// Lowercased extension of a file name, empty when there is none.
pub fn file_extension(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, extension)) => extension.to_lowercase(),
        None => String::new(),
    }
}

pub fn is_allowed_image(file_name: &str) -> bool {
    ALLOWED_IMAGE_EXTENSIONS.contains(&file_extension(file_name).as_str())
}

pub fn content_type_for(file_name: &str) -> &'static str {
    match file_extension(file_name).as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}

/// Plain file names only; anything that could walk out of the upload
/// directory is refused.
pub fn is_safe_file_name(file_name: &str) -> bool {
    !file_name.is_empty()
        && !file_name.contains("..")
        && !file_name.contains('/')
        && !file_name.contains('\\')
}
