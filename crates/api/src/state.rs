use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: casabook_db::DbPool,
    /// Server configuration (tax rate, timeouts, CORS).
    pub config: Arc<ServerConfig>,
    /// Event bus the engine publishes booking events on. The
    /// notification subsystem subscribes here; publishing never fails
    /// a request.
    pub events: Arc<casabook_events::EventBus>,
}
