//! Code execution response DTOs

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ExecuteResponse {
    pub output: String,
}
