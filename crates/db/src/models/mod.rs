//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create/update DTOs consumed by the repositories
//! - Flattened join rows for list endpoints that need related names

pub mod booking;
pub mod notification;
pub mod payment;
pub mod playground;
pub mod review;
pub mod stats;
pub mod user;
