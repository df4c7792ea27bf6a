//! HTML fragment rendering for the admin ticket view.
//!
//! Everything here is pure: it takes the loaded [`TicketView`] and returns
//! markup using Bootstrap and Font Awesome class names.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime};

use helpdesk_types::models::{
    Person, Priority, Status, Ticket, TicketAttachment, TicketResponse, TicketView,
};

/// Relative path the dashboard serves uploaded files from.
pub const UPLOADS_PATH: &str = "../uploads/";

pub const NO_RESPONSES: &str =
    r#"<div class="alert alert-info no-responses">No responses yet.</div>"#;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape, then turn line breaks into `<br>` tags.
pub fn escape_multiline(s: &str) -> String {
    s.split('\n')
        .map(|line| html_escape(line.strip_suffix('\r').unwrap_or(line)))
        .collect::<Vec<_>>()
        .join("<br>\n")
}

pub fn priority_badge(priority: Priority) -> String {
    format!(
        r#"<span class="badge bg-{} priority-badge">{}</span>"#,
        priority.badge().as_str(),
        priority.label()
    )
}

pub fn status_badge(status: Status) -> String {
    format!(
        r#"<span class="badge bg-{} status-badge">{}</span>"#,
        status.badge().as_str(),
        status.label()
    )
}

/// Font Awesome icon classes for a file, chosen by extension.
pub fn file_icon(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "fa-file-pdf text-danger",
        "jpg" | "jpeg" | "png" | "gif" => "fa-file-image text-primary",
        "doc" | "docx" => "fa-file-word text-info",
        _ => "fa-file text-secondary",
    }
}

pub fn format_file_size(bytes: i64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// `Jan 5, 2024 3:07 PM`. Values that don't parse are shown as stored.
pub fn format_timestamp(raw: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"));

    match parsed {
        Ok(dt) => dt.format("%b %-d, %Y %-I:%M %p").to_string(),
        Err(_) => html_escape(raw),
    }
}

pub fn render_ticket(view: &TicketView) -> String {
    let ticket = &view.ticket;
    let mut html = String::new();

    html.push_str(&format!(
        r#"<div class="ticket-detail" data-ticket-id="{}">"#,
        ticket.id
    ));
    html.push_str(&render_header(ticket));
    html.push_str(&render_metadata(ticket));
    html.push_str(&render_description(ticket));
    html.push_str(&render_ticket_attachments(view));
    html.push_str(&render_conversation(view));
    html.push_str("</div>");

    html
}

fn render_header(ticket: &Ticket) -> String {
    format!(
        r#"
<div class="d-flex justify-content-between align-items-start mb-3">
    <h4 class="mb-0">Ticket #{}: {}</h4>
    <div>{} {}</div>
</div>"#,
        ticket.id,
        html_escape(&ticket.subject),
        priority_badge(ticket.priority),
        status_badge(ticket.status)
    )
}

fn render_metadata(ticket: &Ticket) -> String {
    let employee = &ticket.employee;
    let mut left = String::new();

    left.push_str(&format!(
        r#"<p class="mb-1"><strong>{}</strong>"#,
        html_escape(&employee.display_name())
    ));
    if let Some(number) = &employee.employee_number {
        left.push_str(&format!(
            r#" <span class="text-muted">({})</span>"#,
            html_escape(number)
        ));
    }
    left.push_str("</p>");
    left.push_str(&format!(
        r#"<p class="mb-1"><i class="fas fa-envelope"></i> {}</p>"#,
        html_escape(&employee.email)
    ));
    if let Some(phone) = &employee.phone {
        left.push_str(&format!(
            r#"<p class="mb-1"><i class="fas fa-phone"></i> {}</p>"#,
            html_escape(phone)
        ));
    }
    if let Some(department) = employee.department() {
        left.push_str(&format!(
            r#"<p class="mb-1"><strong>Department:</strong> {}</p>"#,
            html_escape(department)
        ));
    }
    if let Some(position) = employee.position() {
        left.push_str(&format!(
            r#"<p class="mb-1"><strong>Position:</strong> {}</p>"#,
            html_escape(position)
        ));
    }

    let mut right = String::new();
    right.push_str(&format!(
        r#"<p class="mb-1"><strong>Category:</strong> {}</p>"#,
        html_escape(&ticket.category)
    ));
    right.push_str(&format!(
        r#"<p class="mb-1"><strong>Created:</strong> {}</p>"#,
        format_timestamp(&ticket.created_at)
    ));
    if let Some(resolved_at) = &ticket.resolved_at {
        right.push_str(&format!(
            r#"<p class="mb-1"><strong>Resolved:</strong> {}</p>"#,
            format_timestamp(resolved_at)
        ));
    }
    let assignee = match &ticket.assignee {
        Some(person) => html_escape(&person.display_name()),
        None => r#"<span class="text-muted">Unassigned</span>"#.to_string(),
    };
    right.push_str(&format!(
        r#"<p class="mb-1"><strong>Assigned To:</strong> {}</p>"#,
        assignee
    ));

    format!(
        r#"
<div class="row mb-3">
    <div class="col-md-6">
        <h6 class="text-muted">Employee</h6>
        {}
    </div>
    <div class="col-md-6">
        <h6 class="text-muted">Details</h6>
        {}
    </div>
</div>"#,
        left, right
    )
}

fn render_description(ticket: &Ticket) -> String {
    format!(
        r#"
<div class="card mb-3">
    <div class="card-header"><strong>Description</strong></div>
    <div class="card-body ticket-description">{}</div>
</div>"#,
        escape_multiline(&ticket.description)
    )
}

fn attachment_link(attachment: &TicketAttachment) -> String {
    let original = html_escape(&attachment.original_filename);
    format!(
        r#"<i class="fas {}"></i> <a href="{}{}" download="{}" target="_blank">{}</a> <small class="text-muted">({})</small>"#,
        file_icon(&attachment.original_filename),
        UPLOADS_PATH,
        html_escape(&attachment.filename),
        original,
        original,
        format_file_size(attachment.file_size)
    )
}

fn render_ticket_attachments(view: &TicketView) -> String {
    let items: Vec<String> = view
        .ticket_attachments()
        .map(|a| {
            format!(
                r#"<li class="list-group-item attachment-item" data-attachment-id="{}">{} <small class="text-muted">by {} on {}</small></li>"#,
                a.id,
                attachment_link(a),
                html_escape(&a.uploader.display_name()),
                format_timestamp(&a.created_at)
            )
        })
        .collect();

    if items.is_empty() {
        return String::new();
    }

    format!(
        r#"
<div class="card mb-3 ticket-attachments">
    <div class="card-header"><i class="fas fa-paperclip"></i> <strong>Attachments ({})</strong></div>
    <ul class="list-group list-group-flush">{}</ul>
</div>"#,
        items.len(),
        items.join("")
    )
}

fn render_conversation(view: &TicketView) -> String {
    let mut html = format!(
        r#"
<h5 class="mt-4 mb-3">Conversation History <span class="badge bg-secondary">{}</span></h5>"#,
        view.responses.len()
    );

    if view.responses.is_empty() {
        html.push_str(NO_RESPONSES);
        return html;
    }

    html.push_str(r#"<div class="ticket-responses">"#);
    for response in &view.responses {
        html.push_str(&render_response(view, response));
    }
    html.push_str("</div>");
    html
}

fn render_response(view: &TicketView, response: &TicketResponse) -> String {
    let (card_class, header_class, internal_badge) = if response.is_internal {
        (
            " border-warning internal-note",
            " bg-warning-subtle",
            r#" <span class="badge bg-warning text-dark">Internal Note</span>"#,
        )
    } else {
        ("", "", "")
    };

    let attachments: Vec<String> = view
        .response_attachments(response.id)
        .map(|a| {
            format!(
                r#"<div class="attachment-item small" data-attachment-id="{}">{}</div>"#,
                a.id,
                attachment_link(a)
            )
        })
        .collect();
    let attachments = if attachments.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="response-attachments mt-2 pt-2 border-top">{}</div>"#,
            attachments.join("")
        )
    };

    format!(
        r#"
<div class="card mb-2 response-card{}" data-response-id="{}">
    <div class="card-header d-flex justify-content-between align-items-center{}">
        <div><strong>{}</strong> {}{}</div>
        <small class="text-muted">{}</small>
    </div>
    <div class="card-body">
        <p class="card-text mb-0">{}</p>{}
    </div>
</div>"#,
        card_class,
        response.id,
        header_class,
        html_escape(&response.author.display_name()),
        role_badge(&response.author),
        internal_badge,
        format_timestamp(&response.created_at),
        escape_multiline(&response.message),
        attachments
    )
}

fn role_badge(person: &Person) -> String {
    let mut chars = person.role.chars();
    let label = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::from("User"),
    };
    let color = if person.role == "admin" { "primary" } else { "secondary" };
    format!(
        r#"<span class="badge bg-{}">{}</span>"#,
        color,
        html_escape(&label)
    )
}
