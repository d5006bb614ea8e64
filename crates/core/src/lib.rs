//! `posdash-core`: shared building blocks for the dashboard router.
//!
//! This crate contains **pure** primitives (no logging, no I/O).

pub mod error;
pub mod id;

pub use error::{ConfigError, ConfigResult};
pub use id::{RouteName, UserId};
