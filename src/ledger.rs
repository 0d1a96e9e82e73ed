//! Rank ledger - append-only history of scored emails
//!
//! Every processed email produces exactly one entry in the recipient's
//! ledger and one in the global ledger. The two appends are one logical
//! operation with two targets; the caller persists both tables.

use tracing::info;

use crate::store::{RankEntry, Table};
use crate::types::{EmailRecord, RankLabels};

/// Append one entry for `email` to both the user's and the global ledger.
pub fn record(
    email: &EmailRecord,
    labels: &RankLabels,
    user_ledger: &mut Table<RankEntry>,
    global_ledger: &mut Table<RankEntry>,
) {
    let entry = RankEntry {
        date: email.date,
        sender: email.from.clone(),
        subject: email.subject.clone(),
        rank: labels.rank,
        priority: labels.priority.clone(),
        intent: labels.intent.clone(),
    };
    user_ledger.push(entry.clone());
    global_ledger.push(entry);
    info!(
        "new email from {} added to rank ledger with rank {}",
        email.from, labels.rank
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn email() -> EmailRecord {
        EmailRecord {
            from: "a@x.com".into(),
            to: "bob".into(),
            subject: "budget review".into(),
            date: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            content: "numbers attached".into(),
        }
    }

    #[test]
    fn test_record_appends_to_both_ledgers() {
        let mut user_ledger = Table::new();
        let mut global_ledger = Table::new();
        let labels = RankLabels::new(0.8, "high", "reply");

        record(&email(), &labels, &mut user_ledger, &mut global_ledger);

        assert_eq!(user_ledger.len(), 1);
        assert_eq!(global_ledger.len(), 1);
        let entry = &user_ledger.rows()[0];
        assert_eq!(entry.sender, "a@x.com");
        assert_eq!(entry.rank, 0.8);
        assert_eq!(entry.priority, "high");
        assert_eq!(entry.intent, "reply");
    }

    #[test]
    fn test_entries_accumulate_in_order() {
        let mut user_ledger = Table::new();
        let mut global_ledger = Table::new();

        record(
            &email(),
            &RankLabels::new(0.1, "low", "read"),
            &mut user_ledger,
            &mut global_ledger,
        );
        record(
            &email(),
            &RankLabels::new(0.9, "high", "reply"),
            &mut user_ledger,
            &mut global_ledger,
        );

        assert_eq!(user_ledger.len(), 2);
        assert_eq!(user_ledger.rows()[0].rank, 0.1);
        assert_eq!(user_ledger.rows()[1].rank, 0.9);
    }
}
