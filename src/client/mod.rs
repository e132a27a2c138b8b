//! Client session layer
//!
//! Front ends keep the login result as a [`Session`] in a [`SessionStore`]
//! and talk to the API through [`ApiClient`].

pub mod api;
pub mod error;
pub mod session;

pub use api::ApiClient;
pub use error::{ClientError, FALLBACK_MESSAGE};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore, SessionUser};
