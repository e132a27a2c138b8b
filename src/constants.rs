//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 5000;

/// API base path
pub const API_BASE_PATH: &str = "/api";

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 1;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 6;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Maximum display name length
pub const MAX_NAME_LENGTH: u64 = 100;

// =============================================================================
// JUDGE DEFAULTS
// =============================================================================

/// Default Judge0 endpoint (RapidAPI hosted CE edition)
pub const DEFAULT_JUDGE_BASE_URL: &str = "https://judge0-ce.p.rapidapi.com";

/// Default value of the `X-RapidAPI-Host` header
pub const DEFAULT_JUDGE_HOST: &str = "judge0-ce.p.rapidapi.com";

/// Default number of status polls before giving up on a submission
pub const DEFAULT_JUDGE_POLL_ATTEMPTS: u32 = 10;

/// Default delay between status polls in milliseconds
pub const DEFAULT_JUDGE_POLL_INTERVAL_MS: u64 = 1000;

/// Default HTTP timeout for a single judge request in seconds
pub const DEFAULT_JUDGE_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Placeholder shown instead of hidden test case data
pub const HIDDEN_PLACEHOLDER: &str = "Hidden";

/// Sentinel recorded when a question was left unanswered
pub const NO_ANSWER: &str = "No Answer";

/// Judge0 status ids
pub mod judge_status {
    pub const IN_QUEUE: i32 = 1;
    pub const PROCESSING: i32 = 2;
    pub const ACCEPTED: i32 = 3;
    pub const TIME_LIMIT_EXCEEDED: i32 = 5;
    pub const COMPILATION_ERROR: i32 = 6;
}

// =============================================================================
// UPLOADS
// =============================================================================

/// Default maximum request body size for uploads (5 MB)
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Allowed image filename pattern (photos, logos)
pub const IMAGE_FILENAME_PATTERN: &str = r"(?i)\.(jpg|jpeg|png)$";

/// Allowed document filename pattern (resumes)
pub const DOCUMENT_FILENAME_PATTERN: &str = r"(?i)\.(pdf|doc|docx)$";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Auth endpoint - max requests
    pub const AUTH_MAX_REQUESTS: u64 = 10;
    /// Auth endpoint - window in seconds
    pub const AUTH_WINDOW_SECS: u64 = 60;

    /// Code execution endpoints - max requests
    pub const JUDGE_MAX_REQUESTS: u64 = 10;
    /// Code execution endpoints - window in seconds
    pub const JUDGE_WINDOW_SECS: u64 = 60;

    /// General API - max requests
    pub const GENERAL_MAX_REQUESTS: u64 = 200;
    /// General API - window in seconds
    pub const GENERAL_WINDOW_SECS: u64 = 60;
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum title length (jobs, tests, problems)
pub const MAX_TITLE_LENGTH: u64 = 256;

/// Maximum long-form text length
pub const MAX_DESCRIPTION_LENGTH: u64 = 65535;

/// Maximum source code size in bytes (64 KB)
pub const MAX_SOURCE_CODE_SIZE: u64 = 64 * 1024;

/// Default coding problem time limit in milliseconds
pub const DEFAULT_TIME_LIMIT_MS: i32 = 2000;

/// Default coding problem memory limit in megabytes
pub const DEFAULT_MEMORY_LIMIT_MB: i32 = 256;

/// Default test duration in minutes
pub const DEFAULT_TEST_DURATION_MINUTES: i32 = 30;
