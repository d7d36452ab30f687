//! Request handlers, one module per resource.
//!
//! Handlers validate input, run the capability check where a resource is
//! owned, delegate to the corresponding repository in `playrental_db`, and
//! map errors via [`crate::error::AppError`].

pub mod admin;
pub mod auth;
pub mod booking;
pub mod notification;
pub mod payment;
pub mod playground;
pub mod review;
pub mod stats;
pub mod user;
