// Image Library - cloud storage gateway and metadata explorer for generated images

pub mod cli;
pub mod config;
pub mod metadata;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod storage;
pub mod tui;       // Terminal explore dialog
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::{AppState, ImageMetadata};
pub use storage::{ErrorDescriptor, GatewayResult, StorageGateway};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
