use serde::{Deserialize, Serialize};

/// Role value that grants access to the admin views.
pub const ADMIN_ROLE: &str = "admin";

// -- JWT Claims --

/// Claims carried by dashboard session tokens. Issued by the login service,
/// only verified here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub role: String,
    pub exp: usize,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

// -- Ticket view --

#[derive(Debug, Default, Deserialize)]
pub struct TicketQuery {
    pub id: Option<String>,
}

impl TicketQuery {
    /// Ticket id from the query string. Missing or non-numeric input yields 0.
    pub fn ticket_id(&self) -> i64 {
        self.id
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }
}
