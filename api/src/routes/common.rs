//! Helpers shared by the route groups.

use axum::extract::{
    Json, Multipart,
    multipart::{MultipartError, MultipartRejection},
    rejection::JsonRejection,
};
use serde::de::DeserializeOwned;
use services::{AppError, media::UploadedFile};
use std::collections::HashMap;

/// A multipart body held in memory, keyed by field name.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// Text value of `name`, trimmed; empty when the field was not sent.
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

/// Reads every part of `multipart`.
///
/// At most one file is accepted per name in `file_fields`. A file part under
/// any other name, or a second file under the same name, is rejected with
/// `Unexpected field: <name>`.
pub async fn collect_multipart(
    multipart: Result<Multipart, MultipartRejection>,
    file_fields: &[&str],
) -> Result<MultipartForm, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let mut form = MultipartForm::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_owned();

        if field.file_name().is_some() {
            if !file_fields.contains(&name.as_str()) || form.files.contains_key(&name) {
                return Err(AppError::BadRequest(format!("Unexpected field: {name}")));
            }

            let file_name = field.file_name().map(str::to_owned);
            let content_type = field.content_type().map(str::to_owned);
            let bytes = field.bytes().await.map_err(malformed)?;

            form.files.insert(
                name,
                UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                },
            );
        } else {
            let value = field.text().await.map_err(malformed)?;
            form.fields.insert(name, value.trim().to_owned());
        }
    }

    Ok(form)
}

fn malformed(err: MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
}

/// Unwraps a JSON body, reporting extractor failures inside the envelope.
pub fn json_body<T: DeserializeOwned>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}
