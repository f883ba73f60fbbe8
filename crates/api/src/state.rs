use std::sync::Arc;

use crate::config::ServerConfig;
use crate::media::MediaStore;
use crate::notify::ContactNotifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: edifica_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Stored-media root; saves uploads, best-effort deletes.
    pub media: Arc<MediaStore>,
    /// Fire-and-forget contact email dispatcher.
    pub notifier: Arc<ContactNotifier>,
}
