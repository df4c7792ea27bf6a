use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::Html,
};
use tracing::{debug, error};

use helpdesk_types::api::TicketQuery;

use crate::auth::AppState;
use crate::error::ViewError;
use crate::{loader, render};

/// GET /admin/tickets/view?id={ticket_id} — admin HTML fragment for one ticket.
pub async fn view_ticket(
    State(state): State<AppState>,
    query: Result<Query<TicketQuery>, QueryRejection>,
) -> Result<Html<String>, ViewError> {
    // An unparseable query string is treated like a missing id
    let ticket_id = query.map(|Query(q)| q).unwrap_or_default().ticket_id();

    // Run the blocking lookups off the async runtime
    let db = state.clone();
    let view = tokio::task::spawn_blocking(move || loader::load_ticket_view(&db.db, ticket_id))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ViewError::Load(e.to_string())
        })??;

    debug!(
        "Rendering ticket {} with {} responses and {} attachments",
        ticket_id,
        view.responses.len(),
        view.attachments.len()
    );

    Ok(Html(render::render_ticket(&view)))
}
