//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod application_repo;
pub mod coding_problem_repo;
pub mod company_repo;
pub mod job_repo;
pub mod test_repo;
pub mod user_repo;

pub use application_repo::{ApplicationAccess, ApplicationRepository};
pub use coding_problem_repo::{CodingProblemRepository, ProblemFields};
pub use company_repo::{CompanyFields, CompanyRepository};
pub use job_repo::{JobFields, JobRepository};
pub use test_repo::{ResultRepository, TestRepository};
pub use user_repo::{ProfileUpdate, UserFile, UserRepository};
