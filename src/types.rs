//! Shared types used across modules
//!
//! The normalized email record produced by the upstream parser and the
//! externally-decided ranking labels carried into the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized email, as handed over by the parsing collaborator.
///
/// The parser owns normalization: `from` is already a bare lower-cased
/// address, `to` identifies the recipient user whose weight tables are
/// updated, and `content` is the extracted plain-text body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Bare sender address, e.g. `alice@example.com`
    pub from: String,
    /// Recipient user; selects the per-user table set
    pub to: String,
    /// Subject line, used verbatim as the thread key
    pub subject: String,
    /// Send time (RFC 3339 in the JSON form)
    pub date: DateTime<Utc>,
    /// Extracted plain-text body
    pub content: String,
}

impl EmailRecord {
    /// The user whose tables this email is scored against.
    pub fn user(&self) -> &str {
        &self.to
    }
}

/// Externally-computed labels attached to a processed email.
///
/// Their semantics are decided upstream; the engine only records them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankLabels {
    pub rank: f64,
    pub priority: String,
    pub intent: String,
}

impl RankLabels {
    pub fn new(rank: f64, priority: impl Into<String>, intent: impl Into<String>) -> Self {
        Self {
            rank,
            priority: priority.into(),
            intent: intent.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_record_json_round_trip() {
        let json = r#"{
            "from": "alice@example.com",
            "to": "bob",
            "subject": "quarterly report",
            "date": "2024-03-01T09:30:00Z",
            "content": "please find attached"
        }"#;
        let email: EmailRecord = serde_json::from_str(json).unwrap();
        assert_eq!(email.user(), "bob");
        assert_eq!(email.from, "alice@example.com");

        let back = serde_json::to_string(&email).unwrap();
        let again: EmailRecord = serde_json::from_str(&back).unwrap();
        assert_eq!(again.subject, "quarterly report");
    }
}
