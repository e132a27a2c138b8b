//! Job response DTOs

use serde::Serialize;

use crate::models::JobApplication;

/// Plain acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Acknowledgement of a new application
#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub message: String,
    pub application: JobApplication,
}
