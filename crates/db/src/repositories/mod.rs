//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-statement flows
//! (slot-checked booking insert, cancel-with-refund, paid-and-confirmed)
//! run inside a single transaction here rather than in handlers.

pub mod booking_repo;
pub mod notification_repo;
pub mod payment_repo;
pub mod playground_repo;
pub mod review_repo;
pub mod stats_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use notification_repo::NotificationRepo;
pub use payment_repo::PaymentRepo;
pub use playground_repo::PlaygroundRepo;
pub use review_repo::ReviewRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
