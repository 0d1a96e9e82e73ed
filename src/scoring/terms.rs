//! Term-weight projection
//!
//! Two symmetric passes over a term-count matrix:
//! - thread-subject terms take the mean weight of every thread whose
//!   subject contains the term, so a term is worth what the threads it
//!   appears in are worth;
//! - message-content terms accumulate a frequency-weighted counter in
//!   log-domain, `ln(e^w + c)`, generalizing the sender recurrence to
//!   variable increments.

use tracing::info;

use crate::store::{MsgTermWeight, Table, ThreadRecord, ThreadTermWeight};
use crate::vectorizer::TermMatrix;

/// Re-project the weight of every term extracted from a thread subject.
///
/// Upserts each matrix term with the mean weight over all thread records
/// whose key contains the term as a substring, falling back to `1.0` when
/// no thread matches (or the mean is otherwise undefined).
pub fn project_thread_terms(
    matrix: &TermMatrix,
    threads: &Table<ThreadRecord>,
    table: &mut Table<ThreadTermWeight>,
) {
    for term in matrix.terms() {
        let weight = mean_thread_weight(threads, term);
        match table.get_mut(term) {
            Some(row) => {
                row.weight = weight;
                info!("weight for term {} from thread subject updated", term);
            }
            None => {
                table.push(ThreadTermWeight {
                    term: term.to_string(),
                    weight,
                });
                info!("new term {} added from thread subject", term);
            }
        }
    }
}

/// Accumulate message-body term counts into the content vocabulary.
pub fn project_msg_terms(matrix: &TermMatrix, table: &mut Table<MsgTermWeight>) {
    for term in matrix.terms() {
        let count = matrix.total(term) as f64;
        match table.get_mut(term) {
            Some(row) => {
                row.weight = (row.weight.exp() + count).ln();
                row.freq += count;
                info!("weight for term {} from email content updated", term);
            }
            None => {
                table.push(MsgTermWeight {
                    term: term.to_string(),
                    weight: (count + 1.0).ln(),
                    freq: count,
                });
                info!("new term {} added from email content", term);
            }
        }
    }
}

/// Mean weight over threads whose subject contains `term`; `1.0` when no
/// thread matches or the mean is not finite.
fn mean_thread_weight(threads: &Table<ThreadRecord>, term: &str) -> f64 {
    let weights: Vec<f64> = threads
        .rows()
        .iter()
        .filter(|t| t.thread.contains(term))
        .map(|t| t.weight)
        .collect();
    if weights.is_empty() {
        return 1.0;
    }
    let mean = weights.iter().sum::<f64>() / weights.len() as f64;
    if mean.is_finite() {
        mean
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::{CountVectorizer, Vectorizer};
    use chrono::{TimeZone, Utc};

    fn thread(key: &str, weight: f64) -> ThreadRecord {
        ThreadRecord {
            thread: key.to_string(),
            weight,
            freq: 1,
            time_span: 0.0,
            first_seen: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        }
    }

    fn matrix_for(text: &str) -> TermMatrix {
        CountVectorizer::new().fit_transform(&[text]).unwrap()
    }

    #[test]
    fn test_unmatched_thread_term_gets_fallback_weight() {
        let threads = Table::new();
        let mut table = Table::new();
        project_thread_terms(&matrix_for("refund request"), &threads, &mut table);

        assert_eq!(table.get("refund").unwrap().weight, 1.0);
        assert_eq!(table.get("request").unwrap().weight, 1.0);
    }

    #[test]
    fn test_thread_term_takes_mean_of_matching_threads() {
        let mut threads = Table::new();
        threads.push(thread("budget review", 2.0));
        threads.push(thread("budget follow-up", 4.0));
        threads.push(thread("lunch plans", 9.0));

        let mut table = Table::new();
        project_thread_terms(&matrix_for("budget"), &threads, &mut table);
        assert_eq!(table.get("budget").unwrap().weight, 3.0);
    }

    #[test]
    fn test_existing_thread_term_is_recomputed() {
        let mut threads = Table::new();
        threads.push(thread("budget review", 6.0));

        let mut table = Table::new();
        table.push(ThreadTermWeight {
            term: "budget".into(),
            weight: 42.0,
        });
        project_thread_terms(&matrix_for("budget"), &threads, &mut table);
        assert_eq!(table.get("budget").unwrap().weight, 6.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_new_msg_term_inserts_softplus_of_count() {
        let mut table = Table::new();
        project_msg_terms(&matrix_for("ship ship ship today"), &mut table);

        let ship = table.get("ship").unwrap();
        assert_eq!(ship.freq, 3.0);
        assert!((ship.weight - 4f64.ln()).abs() < 1e-12);

        let today = table.get("today").unwrap();
        assert_eq!(today.freq, 1.0);
        assert!((today.weight - 2f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_existing_msg_term_accumulates() {
        let mut table = Table::new();
        project_msg_terms(&matrix_for("deploy deploy"), &mut table);
        project_msg_terms(&matrix_for("deploy"), &mut table);

        let row = table.get("deploy").unwrap();
        assert_eq!(row.freq, 3.0);
        // ln(e^{ln 3} + 1) = ln 4
        assert!((row.weight - 4f64.ln()).abs() < 1e-12);
    }
}
