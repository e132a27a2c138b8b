//! Multipart form collection and upload type checks

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::extract::Multipart;
use regex::Regex;

use crate::{
    constants::{DOCUMENT_FILENAME_PATTERN, IMAGE_FILENAME_PATTERN},
    error::{AppError, AppResult},
    models::StoredFile,
};

static IMAGE_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IMAGE_FILENAME_PATTERN).expect("valid image filename pattern"));
static DOCUMENT_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DOCUMENT_FILENAME_PATTERN).expect("valid document filename pattern"));

/// Accepted upload families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `.jpg`, `.jpeg`, `.png`
    Image,
    /// `.pdf`, `.doc`, `.docx`
    Document,
}

impl FileKind {
    pub fn accepts(self, filename: &str) -> bool {
        match self {
            Self::Image => IMAGE_FILENAME.is_match(filename),
            Self::Document => DOCUMENT_FILENAME.is_match(filename),
        }
    }

    fn rejection(self) -> AppError {
        let message = match self {
            Self::Image => "Only image files (jpg, jpeg, png) are allowed",
            Self::Document => "Only PDF and Word documents are allowed",
        };
        AppError::InvalidInput(message.to_string())
    }
}

/// Text fields and files of a multipart body
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    files: HashMap<String, StoredFile>,
}

impl UploadForm {
    /// Drain a multipart body. Parts with a filename are files, the rest text.
    pub async fn collect(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let data = field.bytes().await?.to_vec();
                    form.files.insert(
                        name,
                        StoredFile {
                            data,
                            content_type,
                            filename,
                        },
                    );
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Optional file part checked against `kind`
    pub fn take_file(&mut self, name: &str, kind: FileKind) -> AppResult<Option<StoredFile>> {
        let Some(file) = self.files.remove(name) else {
            return Ok(None);
        };
        check(&file, kind)?;
        Ok(Some(file))
    }

    /// Required file part checked against `kind`
    pub fn require_file(&mut self, name: &str, kind: FileKind) -> AppResult<StoredFile> {
        self.take_file(name, kind)?
            .ok_or_else(|| AppError::InvalidInput("Please upload a file".to_string()))
    }
}

fn check(file: &StoredFile, kind: FileKind) -> AppResult<()> {
    if !kind.accepts(&file.filename) {
        return Err(kind.rejection());
    }
    if file.is_empty() {
        return Err(AppError::InvalidInput("Uploaded file is empty".to_string()));
    }
    Ok(())
}
