//! API routes for the route server.

pub mod error;
mod routes;
pub mod ws;

use axum::Router;

pub use error::ApiError;

pub fn routes() -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router()
}
