use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);"
    )?;

    let version: i64 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                employee_number TEXT UNIQUE,
                email           TEXT NOT NULL UNIQUE,
                phone           TEXT,
                role            TEXT NOT NULL DEFAULT 'employee',
                created_at      TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE employee_profiles (
                user_id     INTEGER PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                first_name  TEXT NOT NULL,
                last_name   TEXT NOT NULL,
                department  TEXT,
                position    TEXT
            );

            CREATE TABLE tickets (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                employee_id INTEGER NOT NULL REFERENCES users(id),
                assigned_to INTEGER REFERENCES users(id),
                subject     TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                category    TEXT NOT NULL,
                priority    TEXT NOT NULL DEFAULT 'medium'
                    CHECK (priority IN ('low', 'medium', 'high', 'urgent')),
                status      TEXT NOT NULL DEFAULT 'open'
                    CHECK (status IN ('open', 'in_progress', 'resolved', 'closed')),
                created_at  TEXT NOT NULL DEFAULT (datetime('now')),
                resolved_at TEXT
            );

            CREATE TABLE ticket_responses (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                ticket_id   INTEGER NOT NULL REFERENCES tickets(id) ON DELETE CASCADE,
                user_id     INTEGER NOT NULL REFERENCES users(id),
                message     TEXT NOT NULL,
                is_internal INTEGER NOT NULL DEFAULT 0,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX idx_ticket_responses_ticket
                ON ticket_responses(ticket_id, created_at);

            CREATE TABLE ticket_attachments (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                ticket_id         INTEGER NOT NULL REFERENCES tickets(id) ON DELETE CASCADE,
                response_id       INTEGER REFERENCES ticket_responses(id) ON DELETE CASCADE,
                uploaded_by       INTEGER NOT NULL REFERENCES users(id),
                filename          TEXT NOT NULL,
                original_filename TEXT NOT NULL,
                file_size         INTEGER NOT NULL DEFAULT 0,
                created_at        TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX idx_ticket_attachments_ticket
                ON ticket_attachments(ticket_id, created_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
