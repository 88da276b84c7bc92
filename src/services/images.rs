//! Image storage on the local filesystem
//!
//! Uploaded files land in `{upload_dir}/animals/` and are referenced as
//! `uploads/animals/{file}`, which is also the path they are served under.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;

/// URL prefix the upload directory is mounted under
pub const PUBLIC_PREFIX: &str = "uploads";
const ANIMALS_DIR: &str = "animals";

/// Raw image received by the boundary layer
#[derive(Debug, Clone, Deserialize)]
pub struct ImageUpload {
    /// Client-side file name, used only for its extension
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct ImageStorage {
    root: PathBuf,
}

impl ImageStorage {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: upload_dir.into(),
        }
    }

    /// Create the upload directories if missing
    pub async fn ensure_dirs(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(self.root.join(ANIMALS_DIR)).await?;
        Ok(())
    }

    /// Store an animal image and return its reference path
    pub async fn save_animal_image(&self, name_hint: &str, image: &ImageUpload) -> AppResult<String> {
        let file_name = format!(
            "{}_{}{}",
            sanitize_stem(name_hint),
            &Uuid::new_v4().simple().to_string()[..16],
            extension_of(image.file_name.as_deref())
        );

        let dir = self.root.join(ANIMALS_DIR);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file_name), &image.bytes).await?;

        tracing::debug!("Stored image {} ({} bytes)", file_name, image.bytes.len());
        Ok(format!("{}/{}/{}", PUBLIC_PREFIX, ANIMALS_DIR, file_name))
    }

    /// Remove a stored image by reference; missing files are ignored.
    pub async fn remove(&self, reference: &str) {
        let Some(relative) = reference.strip_prefix(&format!("{}/", PUBLIC_PREFIX)) else {
            return;
        };
        if relative.split('/').any(|part| part == "..") {
            return;
        }
        match tokio::fs::remove_file(self.root.join(relative)).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove image {}: {}", reference, e),
        }
    }
}

fn sanitize_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "animal".to_string()
    } else {
        stem
    }
}

fn extension_of(file_name: Option<&str>) -> String {
    file_name
        .and_then(|f| Path::new(f).extension())
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}
