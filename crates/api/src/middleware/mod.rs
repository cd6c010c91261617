//! Request middleware.

pub mod auth;

pub use auth::{AUTH_COOKIE, AuthUser, admin_middleware, auth_middleware};
