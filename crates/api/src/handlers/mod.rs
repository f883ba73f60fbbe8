//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod categories;
pub mod clients;
pub mod company;
pub mod contact;
pub mod project_media;
pub mod projects;
pub mod services;

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::{AppError, AppResult};

/// A file part collected from a multipart form.
#[derive(Debug)]
pub(crate) struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Text and file parts of a multipart form, keyed by field name.
///
/// Duplicate field names keep the last occurrence, matching the usual
/// form semantics for single-valued fields.
#[derive(Debug, Default)]
pub(crate) struct MultipartForm {
    pub texts: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// Drain a multipart stream into memory.
    ///
    /// Fields without a filename are decoded as UTF-8 text; fields with
    /// one are kept as raw bytes. The router's body limit caps the total
    /// size before this runs.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| {
                            AppError::BadRequest(format!("Failed to read upload '{name}': {e}"))
                        })?
                        .to_vec();
                    form.files.insert(name, UploadedFile { filename, bytes });
                }
                None => {
                    let text = field.text().await.map_err(|e| {
                        AppError::BadRequest(format!("Field '{name}' is not valid text: {e}"))
                    })?;
                    form.texts.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// A required text field, or 400.
    pub fn require_text(&self, name: &str) -> AppResult<&str> {
        self.texts
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| AppError::BadRequest(format!("Missing required field '{name}'")))
    }

    /// A required file field, or 400.
    pub fn require_file(&self, name: &str) -> AppResult<&UploadedFile> {
        self.files
            .get(name)
            .ok_or_else(|| AppError::BadRequest(format!("Missing required file field '{name}'")))
    }
}
