//! Support ticket models

use serde::{Deserialize, Serialize};

/// Support ticket status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    Answered,
    Closed,
}

impl TicketStatus {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "answered" => Some(Self::Answered),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Answered => "answered",
            Self::Closed => "closed",
        }
    }
}

/// Support ticket entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SupportTicket {
    pub id: String,
    pub tenant_id: String,
    /// Panel user who opened the ticket
    pub opened_by: String,
    pub subject: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Message on a support ticket
///
/// `from_admin` distinguishes operator replies from tenant messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TicketMessage {
    pub id: String,
    pub ticket_id: String,
    pub author_id: String,
    pub from_admin: bool,
    pub body: String,
    pub created_at: i64,
}

/// Open ticket payload
#[derive(Debug, Clone, Deserialize)]
pub struct TicketCreate {
    pub subject: String,
    pub body: String,
}

/// Reply payload
#[derive(Debug, Clone, Deserialize)]
pub struct TicketReply {
    pub body: String,
}

/// Ticket with its message thread
#[derive(Debug, Clone, Serialize)]
pub struct TicketDetail {
    #[serde(flatten)]
    pub ticket: SupportTicket,
    pub messages: Vec<TicketMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_db_roundtrip() {
        for status in [
            TicketStatus::Open,
            TicketStatus::Answered,
            TicketStatus::Closed,
        ] {
            assert_eq!(TicketStatus::from_db(status.as_db()), Some(status));
        }
        assert_eq!(TicketStatus::from_db("resolved"), None);
    }
}
