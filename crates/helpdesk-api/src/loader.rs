use tracing::error;

use helpdesk_db::Database;
use helpdesk_types::models::TicketView;

use crate::error::ViewError;

/// Load a ticket with its conversation and attachments.
///
/// The ticket lookup is fatal: a bad id, a missing row, or a query failure
/// ends the request. Responses and attachments are best-effort and fall back
/// to empty lists with a server-side log entry.
pub fn load_ticket_view(db: &Database, ticket_id: i64) -> Result<TicketView, ViewError> {
    if ticket_id <= 0 {
        return Err(ViewError::InvalidId);
    }

    let ticket = db
        .get_ticket(ticket_id)
        .map_err(|e| ViewError::Load(format!("{:#}", e)))?
        .ok_or(ViewError::NotFound)?;

    let responses = db.get_ticket_responses(ticket_id).unwrap_or_else(|e| {
        error!("Failed to load responses for ticket {}: {:#}", ticket_id, e);
        Vec::new()
    });

    let attachments = db.get_ticket_attachments(ticket_id).unwrap_or_else(|e| {
        error!("Failed to load attachments for ticket {}: {:#}", ticket_id, e);
        Vec::new()
    });

    Ok(TicketView {
        ticket,
        responses,
        attachments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpdesk_db::queries::{NewAttachment, NewTicket};

    fn seeded() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let owner = db
            .create_user(Some("E-100"), "owner@example.com", None, "employee")
            .unwrap();
        let ticket = db
            .create_ticket(&NewTicket {
                employee_id: owner,
                assigned_to: None,
                subject: "Printer jam",
                description: "Tray 2",
                category: "Hardware",
                priority: "low",
                status: "open",
                created_at: None,
                resolved_at: None,
            })
            .unwrap();
        db.add_response(ticket, owner, "still jammed", false, None).unwrap();
        db.add_attachment(&NewAttachment {
            ticket_id: ticket,
            response_id: None,
            uploaded_by: owner,
            filename: "x.jpg",
            original_filename: "jam.jpg",
            file_size: 100,
            created_at: None,
        })
        .unwrap();
        (db, ticket)
    }

    fn break_table(db: &Database, table: &str) {
        db.with_conn(|conn| {
            conn.execute_batch(&format!("ALTER TABLE {table} RENAME TO {table}_offline"))?;
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn rejects_non_positive_ids() {
        let (db, _) = seeded();
        assert!(matches!(load_ticket_view(&db, 0), Err(ViewError::InvalidId)));
        assert!(matches!(load_ticket_view(&db, -5), Err(ViewError::InvalidId)));
    }

    #[test]
    fn missing_ticket_is_not_found() {
        let (db, ticket) = seeded();
        assert!(matches!(load_ticket_view(&db, ticket + 1), Err(ViewError::NotFound)));
    }

    #[test]
    fn loads_everything() {
        let (db, ticket) = seeded();
        let view = load_ticket_view(&db, ticket).unwrap();
        assert_eq!(view.ticket.subject, "Printer jam");
        assert_eq!(view.responses.len(), 1);
        assert_eq!(view.attachments.len(), 1);
    }

    #[test]
    fn response_failure_degrades_to_empty() {
        let (db, ticket) = seeded();
        break_table(&db, "ticket_responses");

        let view = load_ticket_view(&db, ticket).unwrap();
        assert_eq!(view.ticket.id, ticket);
        assert!(view.responses.is_empty());
        assert_eq!(view.attachments.len(), 1);
    }

    #[test]
    fn attachment_failure_degrades_to_empty() {
        let (db, ticket) = seeded();
        break_table(&db, "ticket_attachments");

        let view = load_ticket_view(&db, ticket).unwrap();
        assert_eq!(view.responses.len(), 1);
        assert!(view.attachments.is_empty());
    }

    #[test]
    fn ticket_query_failure_is_fatal() {
        let (db, ticket) = seeded();
        break_table(&db, "tickets");

        match load_ticket_view(&db, ticket) {
            Err(ViewError::Load(msg)) => assert!(msg.contains("no such table"), "{msg}"),
            other => panic!("expected load error, got {other:?}"),
        }
    }
}
