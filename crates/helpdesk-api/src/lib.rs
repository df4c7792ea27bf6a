pub mod auth;
pub mod error;
pub mod loader;
pub mod middleware;
pub mod render;
pub mod tickets;

use axum::{Router, routing::get};

use crate::auth::AppState;

/// Admin-only routes, gated by [`middleware::require_admin`].
pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/admin/tickets/view", get(tickets::view_ticket))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_admin,
        ))
        .with_state(state)
}
