//! `posdash-auth`: session state consumed by the navigation guard.
//!
//! This crate is intentionally decoupled from routing: it only answers
//! "who is signed in, with which roles, and have they accepted the terms".

pub mod claims;
pub mod roles;
pub mod session;
pub mod store;
pub mod tos;

pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use roles::{Role, RoleParseError, RoleSet};
pub use session::SessionState;
pub use store::{AuthStore, InMemoryAuthStore, LoginError, StoreError, UserProfile};
pub use tos::TosStatus;
