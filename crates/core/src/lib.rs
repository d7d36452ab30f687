//! Domain logic for the PlayRental booking platform.
//!
//! Pure types, constants, and validation rules shared by the database and
//! API layers. This crate has no I/O: anything touching Postgres lives in
//! `playrental-db`, anything touching HTTP lives in `playrental-api`.

pub mod error;
pub mod images;
pub mod notifications;
pub mod payments;
pub mod policy;
pub mod pricing;
pub mod roles;
pub mod slots;
pub mod status;
pub mod types;
