//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod application;
pub mod coding_problem;
pub mod company;
pub mod file;
pub mod job;
pub mod result;
pub mod test;
pub mod user;

pub use application::*;
pub use coding_problem::*;
pub use company::*;
pub use file::*;
pub use job::*;
pub use result::*;
pub use test::*;
pub use user::*;
