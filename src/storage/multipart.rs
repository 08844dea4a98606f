use actix_multipart::{Field, Multipart};
use chrono::Utc;
use futures::StreamExt;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;

use super::{naming, BlobStorage};
use crate::models::UploadMeta;

/// Result of parsing a multipart upload submission: the text metadata plus
/// the stored names of the accepted files.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub meta: UploadMeta,
    pub front_file: Option<String>,
    pub toc_file: Option<String>,
}

#[derive(Debug)]
pub enum UploadFormError {
    /// A single file exceeded the size cap; the partial blob was removed.
    FileTooLarge(String),
    /// More than one file arrived under the same field name.
    DuplicateFile(String),
    Multipart(String),
    Io(String),
}

impl fmt::Display for UploadFormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadFormError::FileTooLarge(field) => {
                write!(f, "File in field '{}' exceeds the size limit", field)
            }
            UploadFormError::DuplicateFile(field) => {
                write!(f, "Only one file is allowed in field '{}'", field)
            }
            UploadFormError::Multipart(msg) => write!(f, "Multipart error: {}", msg),
            UploadFormError::Io(msg) => write!(f, "File write error: {}", msg),
        }
    }
}

impl std::error::Error for UploadFormError {}

/// Streams a multipart payload, writing `frontFile`/`tocFile` parts to Blob
/// Storage under generated names and collecting the metadata fields.
///
/// At most one file is accepted per field name; any single file larger than
/// `max_size` aborts the request with its partial blob removed. Files that
/// already landed on disk before a later part fails are left behind, same
/// as record-write failures downstream.
pub async fn read_upload_form(
    mut payload: Multipart,
    storage: &BlobStorage,
    max_size: usize,
) -> Result<UploadForm, UploadFormError> {
    let mut form = UploadForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| UploadFormError::Multipart(e.to_string()))?;

        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        let filename = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());

        match (name.as_str(), filename) {
            ("frontFile", Some(original)) => {
                if form.front_file.is_some() {
                    return Err(UploadFormError::DuplicateFile(name));
                }
                form.front_file = Some(save_file(&mut field, storage, &name, &original, max_size).await?);
            }
            ("tocFile", Some(original)) => {
                if form.toc_file.is_some() {
                    return Err(UploadFormError::DuplicateFile(name));
                }
                form.toc_file = Some(save_file(&mut field, storage, &name, &original, max_size).await?);
            }
            (_, Some(_)) => {
                // file under an unknown field name: discarded
                drain(&mut field).await?;
            }
            (_, None) => {
                let value = read_text(&mut field).await?;
                match name.as_str() {
                    "type" => form.meta.kind = Some(value),
                    "branch" => form.meta.branch = Some(value),
                    "sem" => form.meta.sem = Some(value),
                    "subject" => form.meta.subject = Some(value),
                    "email" => form.meta.email = Some(value),
                    "phone" => form.meta.phone = Some(value),
                    "author" => form.meta.author = Some(value),
                    _ => {}
                }
            }
        }
    }

    Ok(form)
}

async fn save_file(
    field: &mut Field,
    storage: &BlobStorage,
    field_name: &str,
    original: &str,
    max_size: usize,
) -> Result<String, UploadFormError> {
    let stored_name = naming::stored_filename(original, Utc::now().timestamp_millis());
    let path = storage.path_of(&stored_name);

    let mut file = File::create(&path).map_err(|e| UploadFormError::Io(e.to_string()))?;

    let mut total: usize = 0;
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| UploadFormError::Multipart(e.to_string()))?;
        total += data.len();
        if total > max_size {
            let _ = fs::remove_file(&path);
            return Err(UploadFormError::FileTooLarge(field_name.to_string()));
        }
        file.write_all(&data)
            .map_err(|e| UploadFormError::Io(e.to_string()))?;
    }

    Ok(stored_name)
}

async fn read_text(field: &mut Field) -> Result<String, UploadFormError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| UploadFormError::Multipart(e.to_string()))?;
        bytes.extend_from_slice(&data);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

async fn drain(field: &mut Field) -> Result<(), UploadFormError> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(|e| UploadFormError::Multipart(e.to_string()))?;
    }
    Ok(())
}
