//! Business logic services

pub mod auth_service;
pub mod coding_service;
pub mod company_service;
pub mod job_service;
pub mod profile_service;
pub mod test_service;

pub use auth_service::AuthService;
pub use coding_service::{CodingService, EvaluationMode};
pub use company_service::CompanyService;
pub use job_service::JobService;
pub use profile_service::ProfileService;
pub use test_service::TestService;
