//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from the session
//!   cookie or a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `SUPER_ADMIN` role.
//! - [`rbac::RequireOwner`] -- Requires the `OWNER` role.

pub mod auth;
pub mod rbac;
