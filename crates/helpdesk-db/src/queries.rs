use crate::Database;
use anyhow::Result;
use helpdesk_types::models::{
    EmployeeProfile, Person, Ticket, TicketAttachment, TicketResponse,
};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};
use std::str::FromStr;

/// Fields needed to open a ticket.
pub struct NewTicket<'a> {
    pub employee_id: i64,
    pub assigned_to: Option<i64>,
    pub subject: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub priority: &'a str,
    pub status: &'a str,
    pub created_at: Option<&'a str>,
    pub resolved_at: Option<&'a str>,
}

pub struct NewAttachment<'a> {
    pub ticket_id: i64,
    pub response_id: Option<i64>,
    pub uploaded_by: i64,
    pub filename: &'a str,
    pub original_filename: &'a str,
    pub file_size: i64,
    pub created_at: Option<&'a str>,
}

/// Column list for a user joined with its profile. Callers alias the user
/// table as `{u}` and the profile table as `{u}p`.
macro_rules! person_columns {
    ($u:literal) => {
        concat!(
            $u, ".id, ", $u, ".employee_number, ", $u, ".email, ", $u, ".phone, ", $u, ".role, ",
            $u, "p.first_name, ", $u, "p.last_name, ", $u, "p.department, ", $u, "p.position"
        )
    };
}

const PERSON_WIDTH: usize = 9;

impl Database {
    // -- Reads --

    pub fn get_ticket(&self, ticket_id: i64) -> Result<Option<Ticket>> {
        self.with_conn(|conn| query_ticket(conn, ticket_id))
    }

    pub fn get_ticket_responses(&self, ticket_id: i64) -> Result<Vec<TicketResponse>> {
        self.with_conn(|conn| query_responses(conn, ticket_id))
    }

    pub fn get_ticket_attachments(&self, ticket_id: i64) -> Result<Vec<TicketAttachment>> {
        self.with_conn(|conn| query_attachments(conn, ticket_id))
    }

    // -- Writes --

    pub fn create_user(
        &self,
        employee_number: Option<&str>,
        email: &str,
        phone: Option<&str>,
        role: &str,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (employee_number, email, phone, role) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![employee_number, email, phone, role],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn upsert_profile(&self, user_id: i64, profile: &EmployeeProfile) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO employee_profiles (user_id, first_name, last_name, department, position)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(user_id) DO UPDATE SET
                    first_name = excluded.first_name,
                    last_name = excluded.last_name,
                    department = excluded.department,
                    position = excluded.position",
                rusqlite::params![
                    user_id,
                    profile.first_name,
                    profile.last_name,
                    profile.department,
                    profile.position,
                ],
            )?;
            Ok(())
        })
    }

    pub fn create_ticket(&self, ticket: &NewTicket<'_>) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tickets
                    (employee_id, assigned_to, subject, description, category, priority, status, created_at, resolved_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, COALESCE(?8, datetime('now')), ?9)",
                rusqlite::params![
                    ticket.employee_id,
                    ticket.assigned_to,
                    ticket.subject,
                    ticket.description,
                    ticket.category,
                    ticket.priority,
                    ticket.status,
                    ticket.created_at,
                    ticket.resolved_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn add_response(
        &self,
        ticket_id: i64,
        user_id: i64,
        message: &str,
        is_internal: bool,
        created_at: Option<&str>,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO ticket_responses (ticket_id, user_id, message, is_internal, created_at)
                 VALUES (?1, ?2, ?3, ?4, COALESCE(?5, datetime('now')))",
                rusqlite::params![ticket_id, user_id, message, is_internal, created_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn add_attachment(&self, attachment: &NewAttachment<'_>) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO ticket_attachments
                    (ticket_id, response_id, uploaded_by, filename, original_filename, file_size, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, COALESCE(?7, datetime('now')))",
                rusqlite::params![
                    attachment.ticket_id,
                    attachment.response_id,
                    attachment.uploaded_by,
                    attachment.filename,
                    attachment.original_filename,
                    attachment.file_size,
                    attachment.created_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }
}

fn query_ticket(conn: &Connection, ticket_id: i64) -> Result<Option<Ticket>> {
    let sql = concat!(
        "SELECT t.id, t.subject, t.description, t.priority, t.status, t.category,
                t.created_at, t.resolved_at, ",
        person_columns!("e"),
        ", ",
        person_columns!("a"),
        "
         FROM tickets t
         JOIN users e ON t.employee_id = e.id
         LEFT JOIN employee_profiles ep ON ep.user_id = e.id
         LEFT JOIN users a ON t.assigned_to = a.id
         LEFT JOIN employee_profiles ap ON ap.user_id = a.id
         WHERE t.id = ?1"
    );
    let mut stmt = conn.prepare(sql)?;

    let ticket = stmt
        .query_row([ticket_id], |row| {
            Ok(Ticket {
                id: row.get(0)?,
                subject: row.get(1)?,
                description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                priority: parse_column(row, 3)?,
                status: parse_column(row, 4)?,
                category: row.get(5)?,
                created_at: row.get(6)?,
                resolved_at: row.get(7)?,
                employee: person_at(row, 8)?,
                assignee: optional_person_at(row, 8 + PERSON_WIDTH)?,
            })
        })
        .optional()?;

    Ok(ticket)
}

fn query_responses(conn: &Connection, ticket_id: i64) -> Result<Vec<TicketResponse>> {
    let sql = concat!(
        "SELECT r.id, r.ticket_id, r.message, r.is_internal, r.created_at, ",
        person_columns!("u"),
        "
         FROM ticket_responses r
         JOIN users u ON r.user_id = u.id
         LEFT JOIN employee_profiles up ON up.user_id = u.id
         WHERE r.ticket_id = ?1
         ORDER BY r.created_at ASC, r.id ASC"
    );
    let mut stmt = conn.prepare(sql)?;

    let rows = stmt
        .query_map([ticket_id], |row| {
            Ok(TicketResponse {
                id: row.get(0)?,
                ticket_id: row.get(1)?,
                message: row.get(2)?,
                is_internal: row.get(3)?,
                created_at: row.get(4)?,
                author: person_at(row, 5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_attachments(conn: &Connection, ticket_id: i64) -> Result<Vec<TicketAttachment>> {
    let sql = concat!(
        "SELECT f.id, f.ticket_id, f.response_id, f.filename, f.original_filename,
                f.file_size, f.created_at, ",
        person_columns!("u"),
        "
         FROM ticket_attachments f
         JOIN users u ON f.uploaded_by = u.id
         LEFT JOIN employee_profiles up ON up.user_id = u.id
         WHERE f.ticket_id = ?1
         ORDER BY f.created_at ASC, f.id ASC"
    );
    let mut stmt = conn.prepare(sql)?;

    let rows = stmt
        .query_map([ticket_id], |row| {
            Ok(TicketAttachment {
                id: row.get(0)?,
                ticket_id: row.get(1)?,
                response_id: row.get(2)?,
                filename: row.get(3)?,
                original_filename: row.get(4)?,
                file_size: row.get(5)?,
                created_at: row.get(6)?,
                uploader: person_at(row, 7)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn person_at(row: &Row<'_>, base: usize) -> rusqlite::Result<Person> {
    let profile = match row.get::<_, Option<String>>(base + 5)? {
        Some(first_name) => Some(EmployeeProfile {
            first_name,
            last_name: row.get::<_, Option<String>>(base + 6)?.unwrap_or_default(),
            department: row.get(base + 7)?,
            position: row.get(base + 8)?,
        }),
        None => None,
    };

    Ok(Person {
        id: row.get(base)?,
        employee_number: row.get(base + 1)?,
        email: row.get(base + 2)?,
        phone: row.get(base + 3)?,
        role: row.get(base + 4)?,
        profile,
    })
}

/// LEFT JOINed person: a NULL id means no row matched.
fn optional_person_at(row: &Row<'_>, base: usize) -> rusqlite::Result<Option<Person>> {
    if row.get::<_, Option<i64>>(base)?.is_none() {
        return Ok(None);
    }
    person_at(row, base).map(Some)
}

fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
