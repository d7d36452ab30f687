//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT session-token generation, validation, and
//!   email-verification token helpers.
//! - [`cookie`] -- HTTP-only session cookie construction and parsing.

pub mod cookie;
pub mod jwt;
pub mod password;
