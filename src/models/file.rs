//! Binary files stored in-row (photos, resumes, logos)

use sqlx::FromRow;

/// An uploaded file with its metadata
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StoredFile {
    pub data: Vec<u8>,
    pub content_type: String,
    pub filename: String,
}

impl StoredFile {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
