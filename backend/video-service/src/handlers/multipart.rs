/// Multipart form reading for upload endpoints
use actix_multipart::Multipart;
use futures::StreamExt;
use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::media::{MediaKind, MediaUpload};

const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

/// A file part as received.
#[derive(Debug)]
pub struct FilePart {
    pub file_name: Option<String>,
    pub content_type: Option<mime::Mime>,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn into_upload(self, kind: MediaKind) -> MediaUpload {
        MediaUpload {
            kind,
            file_name: self.file_name,
            content_type: self.content_type.unwrap_or(mime::APPLICATION_OCTET_STREAM),
            bytes: self.bytes,
        }
    }
}

/// Text and file parts keyed by field name. Parts with a file name are files.
#[derive(Debug, Default)]
pub struct FormData {
    text: HashMap<String, String>,
    files: HashMap<String, FilePart>,
}

impl FormData {
    /// First present text field among `names`.
    pub fn text(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|n| self.text.get(*n).cloned())
    }

    pub fn take_file(&mut self, names: &[&str]) -> Option<FilePart> {
        names.iter().find_map(|n| self.files.remove(*n))
    }
}

/// Drain the whole multipart stream, enforcing a total size limit.
pub async fn read_form(mut payload: Multipart, max_bytes: usize) -> Result<FormData> {
    let mut form = FormData::default();
    let mut total: usize = 0;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);
        let content_type = field.content_type().cloned();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            total += chunk.len();
            if total > max_bytes {
                return Err(AppError::BadRequest(format!(
                    "Upload exceeds {} bytes",
                    max_bytes
                )));
            }
            if file_name.is_none() && bytes.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
                return Err(AppError::BadRequest(format!("Field {} is too large", name)));
            }
            bytes.extend_from_slice(&chunk);
        }

        match file_name {
            Some(file_name) => {
                form.files.insert(
                    name,
                    FilePart {
                        file_name: Some(file_name),
                        content_type,
                        bytes,
                    },
                );
            }
            None => {
                let value = String::from_utf8(bytes)
                    .map_err(|_| AppError::BadRequest(format!("Field {} is not UTF-8", name)))?;
                form.text.insert(name, value);
            }
        }
    }

    Ok(form)
}

/// `"true"`/`"1"` or `"false"`/`"0"`, case-insensitive and trimmed; anything else is a 400.
pub fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(AppError::BadRequest("isPublished must be true or false".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        assert!(parse_flag("TRUE").unwrap());
        assert!(!parse_flag(" 0 ").unwrap());
        assert!(parse_flag("1").unwrap());
        assert!(!parse_flag("False").unwrap());
        assert!(parse_flag("yes").is_err());
    }

    #[test]
    fn file_part_defaults_to_octet_stream() {
        let upload = FilePart {
            file_name: None,
            content_type: None,
            bytes: vec![0],
        }
        .into_upload(MediaKind::Video);
        assert_eq!(upload.content_type, mime::APPLICATION_OCTET_STREAM);
    }
}
