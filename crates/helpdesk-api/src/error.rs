use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::render::html_escape;

/// Failures that stop the ticket view. Each renders as a single alert
/// fragment in place of the ticket.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Invalid ticket ID")]
    InvalidId,

    #[error("Ticket not found")]
    NotFound,

    #[error("Error loading ticket: {0}")]
    Load(String),
}

impl ViewError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_html(&self) -> String {
        let level = match self {
            Self::NotFound => "warning",
            _ => "danger",
        };
        format!(
            r#"<div class="alert alert-{}">{}</div>"#,
            level,
            html_escape(&self.to_string())
        )
    }
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        (self.status(), Html(self.to_html())).into_response()
    }
}
