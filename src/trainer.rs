//! Online trainer - one-email-at-a-time orchestration
//!
//! Loads the recipient's table set, applies every update rule in order,
//! and persists each table after its mutation, mirroring the incremental
//! load-mutate-save cycle the tables are designed around. Single-threaded
//! by design: two concurrent train calls for the same user can lose one
//! another's updates, and serializing per-user calls is the caller's job.

use tracing::warn;

use crate::error::StoreError;
use crate::ledger;
use crate::scoring::{sender, terms, thread};
use crate::store::{WeightStore, GLOBAL_USER};
use crate::types::{EmailRecord, RankLabels};
use crate::vectorizer::Vectorizer;

/// Orchestrates the per-email weight updates over an injected vectorizer.
pub struct OnlineTrainer<V> {
    store: WeightStore,
    vectorizer: V,
}

impl<V: Vectorizer> OnlineTrainer<V> {
    pub fn new(store: WeightStore, vectorizer: V) -> Self {
        Self { store, vectorizer }
    }

    pub fn store(&self) -> &WeightStore {
        &self.store
    }

    /// Process one normalized email with its externally-decided labels.
    ///
    /// A missing table set for the recipient (or for the global scope)
    /// aborts the whole call. Once loading succeeds every update runs
    /// unconditionally, except the two term projections, which are skipped
    /// individually when the subject or body yields no usable terms.
    ///
    /// The user ledger and the global ledger are saved back to back; a
    /// failure between the two saves leaves them one entry apart. That
    /// inconsistency window is accepted here rather than guarded.
    pub fn train(&self, email: &EmailRecord, labels: &RankLabels) -> Result<(), StoreError> {
        let user = email.user();
        let mut tables = self.store.load(user)?;

        sender::observe(&mut tables.senders, &email.from);
        self.store.save_sender_weights(user, &tables.senders)?;

        sender::observe(&mut tables.thread_senders, &email.from);
        self.store
            .save_thread_sender_weights(user, &tables.thread_senders)?;

        thread::observe(&mut tables.threads, &email.subject, email.date);
        self.store.save_thread_weights(user, &tables.threads)?;

        match self.vectorizer.fit_transform(&[email.subject.as_str()]) {
            Ok(matrix) => {
                terms::project_thread_terms(&matrix, &tables.threads, &mut tables.thread_terms);
                self.store
                    .save_thread_term_weights(user, &tables.thread_terms)?;
            }
            Err(err) => warn!("empty subject, thread terms unchanged: {}", err),
        }

        match self.vectorizer.fit_transform(&[email.content.as_str()]) {
            Ok(matrix) => {
                terms::project_msg_terms(&matrix, &mut tables.msg_terms);
                self.store.save_msg_term_weights(user, &tables.msg_terms)?;
            }
            Err(err) => warn!("empty email message, content terms unchanged: {}", err),
        }

        // The global ledger is loaded fresh, independent of the per-user
        // load at the top of this call.
        let mut global_ledger = self.store.load_rank_log(GLOBAL_USER)?;
        ledger::record(email, labels, &mut tables.rank_log, &mut global_ledger);
        self.store.save_rank_log(user, &tables.rank_log)?;
        self.store.save_rank_log(GLOBAL_USER, &global_ledger)?;

        Ok(())
    }
}
