//! Image hosting. Products are invalid without at least one image URI, so
//! uploads run to completion before a create or update is attempted, and the
//! first failure aborts the whole batch.

use crate::config::ImageHostConfig;
use crate::error::{Result, StoreError};
use serde_json::Value;
use std::path::{Path, PathBuf};

const PRESET_NOT_FOUND: &str = "Upload preset not found";

pub trait ImageHost {
    /// Upload one file and return its public URI.
    fn upload(&self, file: &Path) -> Result<String>;
}

/// Unsigned uploads to a Cloudinary-style endpoint.
pub struct CloudinaryHost {
    settings: ImageHostConfig,
    client: reqwest::blocking::Client,
}

impl CloudinaryHost {
    pub fn new(settings: ImageHostConfig) -> Result<Self> {
        if settings.cloud_name.is_empty() || settings.upload_preset.is_empty() {
            return Err(StoreError::Config(
                "image host needs a cloud name and an upload preset".to_string(),
            ));
        }
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| StoreError::Upload(e.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.settings.cloud_name
        )
    }
}

impl ImageHost for CloudinaryHost {
    fn upload(&self, file: &Path) -> Result<String> {
        let form = reqwest::blocking::multipart::Form::new()
            .file("file", file)
            .map_err(|e| StoreError::Upload(format!("{}: {}", file.display(), e)))?
            .text("upload_preset", self.settings.upload_preset.clone())
            .text("cloud_name", self.settings.cloud_name.clone())
            .text("api_key", self.settings.api_key.clone());

        tracing::debug!(file = %file.display(), endpoint = %self.endpoint(), "uploading image");

        let response = self
            .client
            .post(self.endpoint())
            .multipart(form)
            .send()
            .map_err(|e| StoreError::Upload(e.to_string()))?;

        let status = response.status();
        let body: Value = response.json().map_err(|e| {
            StoreError::Upload(format!("unreadable response ({}): {}", status, e))
        })?;

        interpret_response(&body)
    }
}

/// Pull the secure URI out of a host response, or turn its error payload into
/// a message an admin can act on.
pub fn interpret_response(body: &Value) -> Result<String> {
    if let Some(url) = body.get("secure_url").and_then(Value::as_str) {
        return Ok(url.to_string());
    }

    match body.pointer("/error/message").and_then(Value::as_str) {
        Some(PRESET_NOT_FOUND) => Err(StoreError::Upload(
            "Upload preset not found. Please create the upload preset in your image host account."
                .to_string(),
        )),
        Some(message) => Err(StoreError::Upload(message.to_string())),
        None => Err(StoreError::Upload(
            "Invalid response from image host".to_string(),
        )),
    }
}

/// Upload files in order, stopping at the first failure.
pub fn upload_all<H: ImageHost + ?Sized>(host: &H, files: &[PathBuf]) -> Result<Vec<String>> {
    let mut uris = Vec::with_capacity(files.len());
    for file in files {
        match host.upload(file) {
            Ok(uri) => uris.push(uri),
            Err(e) => {
                tracing::warn!(file = %file.display(), error = %e, "image upload failed");
                return Err(e);
            }
        }
    }
    Ok(uris)
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::cell::RefCell;

    /// Host that returns canned URIs and fails on files named `fail*`.
    #[derive(Default)]
    pub struct FakeHost {
        pub uploaded: RefCell<Vec<PathBuf>>,
    }

    impl ImageHost for FakeHost {
        fn upload(&self, file: &Path) -> Result<String> {
            let name = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            if name.starts_with("fail") {
                return Err(StoreError::Upload("network unreachable".into()));
            }
            self.uploaded.borrow_mut().push(file.to_path_buf());
            Ok(format!("https://img.example/{}", name))
        }
    }
}
