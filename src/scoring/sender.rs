//! Sender engagement scoring
//!
//! Maintains a per-sender visit counter in log-domain: a weight of `ln(n)`
//! stands for `n` observed messages, and each observation applies
//! `w' = ln(e^w + 1)`, which is exactly `ln(n) -> ln(n+1)`. New senders are
//! inserted at `ln 2` rather than `ln 1 = 0`, so a first-time sender starts
//! with a strictly positive weight (the triggering message counts as the
//! second event). The same rule runs against both the sender table and the
//! thread-scoped sender table.

use tracing::info;

use crate::store::{SenderWeight, Table};

/// Record one observed message from `sender`.
pub fn observe(table: &mut Table<SenderWeight>, sender: &str) {
    match table.get_mut(sender) {
        Some(row) => {
            row.weight = (row.weight.exp() + 1.0).ln();
            info!("weight for sender {} updated", sender);
        }
        None => {
            table.push(SenderWeight {
                sender: sender.to_string(),
                weight: 2f64.ln(),
            });
            info!("new sender {} added", sender);
        }
    }
}
