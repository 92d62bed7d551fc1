use std::sync::Arc;

use tokio::sync::RwLock;

use recolour_engine::seed::seed_demo_data;
use recolour_engine::{PhotoService, TicketService};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The ticket engine. It owns the store, so every mutation goes through
    /// the write half of this lock.
    pub tickets: Arc<RwLock<TicketService>>,
    /// Partner photo file storage.
    pub photos: Arc<PhotoService>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build fresh state for `config`, loading the demo tickets when enabled.
    pub fn new(config: ServerConfig) -> Self {
        let mut tickets = TicketService::default();
        if config.seed_demo_data {
            seed_demo_data(&mut tickets);
        }

        Self {
            tickets: Arc::new(RwLock::new(tickets)),
            photos: Arc::new(PhotoService::new(config.uploads_path.clone())),
            config: Arc::new(config),
        }
    }
}
