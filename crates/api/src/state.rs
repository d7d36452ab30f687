use std::sync::Arc;

use crate::config::ServerConfig;
use crate::email::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: playrental_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// SMTP mailer. `None` when `SMTP_HOST` is unset; handlers then log the
    /// would-be email instead of sending.
    pub mailer: Option<Arc<Mailer>>,
}
