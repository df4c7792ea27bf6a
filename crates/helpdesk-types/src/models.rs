use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bootstrap contextual color used for badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Danger,
    Warning,
    Info,
    Success,
}

impl BadgeColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Success => "success",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

// -- Priority --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }

    pub fn badge(self) -> BadgeColor {
        match self {
            Self::Urgent => BadgeColor::Danger,
            Self::High => BadgeColor::Warning,
            Self::Medium => BadgeColor::Info,
            _ => BadgeColor::Success,
        }
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(UnknownVariant {
                kind: "priority",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// -- Status --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }

    pub fn badge(self) -> BadgeColor {
        match self {
            Self::Open => BadgeColor::Danger,
            Self::InProgress => BadgeColor::Warning,
            Self::Resolved => BadgeColor::Info,
            _ => BadgeColor::Success,
        }
    }
}

impl FromStr for Status {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            other => Err(UnknownVariant {
                kind: "status",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// -- People --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub first_name: String,
    pub last_name: String,
    pub department: Option<String>,
    pub position: Option<String>,
}

/// A user row joined with its optional employee profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub employee_number: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub profile: Option<EmployeeProfile>,
}

impl Person {
    /// Profile name when one is on file, otherwise the email address.
    pub fn display_name(&self) -> String {
        self.profile
            .as_ref()
            .map(|p| format!("{} {}", p.first_name.trim(), p.last_name.trim()))
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.email.clone())
    }

    pub fn department(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| p.department.as_deref())
    }

    pub fn position(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| p.position.as_deref())
    }
}

// -- Tickets --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub subject: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub category: String,
    pub created_at: String,
    pub resolved_at: Option<String>,
    pub employee: Person,
    pub assignee: Option<Person>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketResponse {
    pub id: i64,
    pub ticket_id: i64,
    pub author: Person,
    pub message: String,
    pub is_internal: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketAttachment {
    pub id: i64,
    pub ticket_id: i64,
    /// `None` when the file was attached to the ticket itself.
    pub response_id: Option<i64>,
    pub uploader: Person,
    pub filename: String,
    pub original_filename: String,
    pub file_size: i64,
    pub created_at: String,
}

/// Everything the admin ticket page needs, loaded up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketView {
    pub ticket: Ticket,
    pub responses: Vec<TicketResponse>,
    pub attachments: Vec<TicketAttachment>,
}

impl TicketView {
    pub fn ticket_attachments(&self) -> impl Iterator<Item = &TicketAttachment> {
        self.attachments.iter().filter(|a| a.response_id.is_none())
    }

    pub fn response_attachments(&self, response_id: i64) -> impl Iterator<Item = &TicketAttachment> {
        self.attachments
            .iter()
            .filter(move |a| a.response_id == Some(response_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(profile: Option<EmployeeProfile>) -> Person {
        Person {
            id: 7,
            employee_number: Some("E-0007".into()),
            email: "jdoe@example.com".into(),
            phone: None,
            role: "employee".into(),
            profile,
        }
    }

    fn attachment(id: i64, response_id: Option<i64>) -> TicketAttachment {
        TicketAttachment {
            id,
            ticket_id: 1,
            response_id,
            uploader: person(None),
            filename: format!("stored_{id}.pdf"),
            original_filename: format!("file_{id}.pdf"),
            file_size: 1024,
            created_at: "2024-01-05 15:07:00".into(),
        }
    }

    #[test]
    fn priority_badges() {
        assert_eq!(Priority::Urgent.badge(), BadgeColor::Danger);
        assert_eq!(Priority::High.badge(), BadgeColor::Warning);
        assert_eq!(Priority::Medium.badge(), BadgeColor::Info);
        assert_eq!(Priority::Low.badge(), BadgeColor::Success);
    }

    #[test]
    fn status_badges() {
        assert_eq!(Status::Open.badge(), BadgeColor::Danger);
        assert_eq!(Status::InProgress.badge(), BadgeColor::Warning);
        assert_eq!(Status::Resolved.badge(), BadgeColor::Info);
        assert_eq!(Status::Closed.badge(), BadgeColor::Success);
    }

    #[test]
    fn enum_parsing() {
        assert_eq!("in_progress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!("urgent".parse::<Priority>(), Ok(Priority::Urgent));

        let err = "critical".parse::<Priority>().unwrap_err();
        assert_eq!(err.to_string(), "unknown priority value 'critical'");
        assert!("In Progress".parse::<Status>().is_err());
    }

    #[test]
    fn serde_uses_stored_names() {
        assert_eq!(serde_json::to_string(&Status::InProgress).unwrap(), "\"in_progress\"");
        assert_eq!(Status::InProgress.label(), "In Progress");
    }

    #[test]
    fn display_name_prefers_profile() {
        let named = person(Some(EmployeeProfile {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            department: Some("Finance".into()),
            position: None,
        }));
        assert_eq!(named.display_name(), "Jane Doe");
        assert_eq!(named.department(), Some("Finance"));

        assert_eq!(person(None).display_name(), "jdoe@example.com");

        let blank = person(Some(EmployeeProfile {
            first_name: " ".into(),
            last_name: String::new(),
            department: None,
            position: None,
        }));
        assert_eq!(blank.display_name(), "jdoe@example.com");
    }

    #[test]
    fn attachments_split_by_response() {
        let view = TicketView {
            ticket: Ticket {
                id: 1,
                subject: "VPN".into(),
                description: String::new(),
                priority: Priority::Low,
                status: Status::Open,
                category: "IT".into(),
                created_at: "2024-01-05 15:07:00".into(),
                resolved_at: None,
                employee: person(None),
                assignee: None,
            },
            responses: vec![],
            attachments: vec![attachment(1, None), attachment(2, Some(10)), attachment(3, Some(11))],
        };

        let top: Vec<i64> = view.ticket_attachments().map(|a| a.id).collect();
        assert_eq!(top, vec![1]);
        let nested: Vec<i64> = view.response_attachments(10).map(|a| a.id).collect();
        assert_eq!(nested, vec![2]);
        assert_eq!(view.response_attachments(99).count(), 0);
    }
}
