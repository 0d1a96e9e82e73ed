//! Thread recurrence/velocity scoring
//!
//! Threads are keyed by exact subject text. The weight approximates a
//! log-scaled messages-per-second rate, offset by 10 to sit in the same
//! positive range as the other weight scales. Velocity needs at least two
//! prior occurrences before it is meaningful, so the first two observations
//! only establish the baseline row and bump the frequency.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::store::{Table, ThreadRecord};

/// Record one message on `thread` sent at `sent_at`.
///
/// Zero (or negative) elapsed time since the thread's first occurrence
/// would make the velocity undefined; in that case the weight and time_span
/// keep their previous values while the frequency still increments, so a
/// later occurrence with positive elapsed time recovers the weight.
pub fn observe(table: &mut Table<ThreadRecord>, thread: &str, sent_at: DateTime<Utc>) {
    match table.get_mut(thread) {
        Some(row) => {
            if row.freq >= 2 {
                let elapsed = elapsed_seconds(row.first_seen, sent_at);
                if elapsed > 0.0 {
                    row.time_span = elapsed;
                    row.weight = 10.0 + (row.freq as f64 / elapsed).log10();
                } else {
                    warn!(
                        "thread {} recurred with no elapsed time; velocity unchanged",
                        thread
                    );
                }
            }
            row.freq += 1;
            info!("weight for thread {} updated", thread);
        }
        None => {
            table.push(ThreadRecord {
                thread: thread.to_string(),
                weight: 1.0,
                freq: 1,
                time_span: 0.0,
                first_seen: sent_at,
            });
            info!("new thread {} added", thread);
        }
    }
}

fn elapsed_seconds(first_seen: DateTime<Utc>, sent_at: DateTime<Utc>) -> f64 {
    (sent_at - first_seen).num_milliseconds() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, secs).unwrap()
    }

    #[test]
    fn test_first_occurrence_bootstraps_row() {
        let mut table = Table::new();
        observe(&mut table, "standup notes", at(0));

        let row = table.get("standup notes").unwrap();
        assert_eq!(row.freq, 1);
        assert_eq!(row.weight, 1.0);
        assert_eq!(row.time_span, 0.0);
        assert_eq!(row.first_seen, at(0));
    }

    #[test]
    fn test_second_occurrence_only_bumps_frequency() {
        let mut table = Table::new();
        observe(&mut table, "standup notes", at(0));
        observe(&mut table, "standup notes", at(30));

        let row = table.get("standup notes").unwrap();
        assert_eq!(row.freq, 2);
        assert_eq!(row.weight, 1.0);
        assert_eq!(row.time_span, 0.0);
    }

    #[test]
    fn test_third_occurrence_sets_velocity_weight() {
        let mut table = Table::new();
        observe(&mut table, "standup notes", at(0));
        observe(&mut table, "standup notes", at(10));
        observe(&mut table, "standup notes", at(40));

        let row = table.get("standup notes").unwrap();
        assert_eq!(row.freq, 3);
        assert_eq!(row.time_span, 40.0);
        // freq before increment was 2, elapsed 40s
        let expected = 10.0 + (2.0f64 / 40.0).log10();
        assert!((row.weight - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_elapsed_keeps_previous_weight() {
        let mut table = Table::new();
        observe(&mut table, "standup notes", at(0));
        observe(&mut table, "standup notes", at(0));
        observe(&mut table, "standup notes", at(0));

        let row = table.get("standup notes").unwrap();
        assert_eq!(row.freq, 3);
        assert_eq!(row.weight, 1.0);
        assert_eq!(row.time_span, 0.0);
        assert!(row.weight.is_finite());
    }

    #[test]
    fn test_velocity_recovers_after_zero_elapsed() {
        let mut table = Table::new();
        observe(&mut table, "standup notes", at(0));
        observe(&mut table, "standup notes", at(0));
        observe(&mut table, "standup notes", at(0));
        observe(&mut table, "standup notes", at(20));

        let row = table.get("standup notes").unwrap();
        assert_eq!(row.freq, 4);
        assert_eq!(row.time_span, 20.0);
        let expected = 10.0 + (3.0f64 / 20.0).log10();
        assert!((row.weight - expected).abs() < 1e-12);
    }

    #[test]
    fn test_frequency_is_monotone() {
        let mut table = Table::new();
        let mut last = 0;
        for i in 0..6 {
            observe(&mut table, "standup notes", at(i * 5));
            let freq = table.get("standup notes").unwrap().freq;
            assert!(freq > last);
            last = freq;
        }
        assert_eq!(last, 6);
    }
}
