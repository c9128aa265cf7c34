//! Caller identity supplied by the platform's authentication layer.
//!
//! Authentication itself (credentials, sessions, tokens) lives upstream of
//! this engine. Operations here receive an already-established [`Identity`]
//! and only decide what that caller is allowed to do.

pub mod models;

pub use models::{Identity, Role, UserId};
