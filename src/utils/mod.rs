//! Utility functions

pub mod upload;
pub mod validation;

pub use upload::{FileKind, UploadForm};
pub use validation::{non_blank, validate_source_code};
