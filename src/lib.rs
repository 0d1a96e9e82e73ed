//! Mailrank - online email priority scoring
//!
//! An incremental scoring engine that maintains per-user weight tables
//! approximating how important a sender, thread, or term is, based on
//! observed history:
//! - Log-domain sender engagement counters
//! - Thread recurrence/velocity weights
//! - Term-weight projection over subject and body vocabularies
//! - An append-only rank ledger, per user and global
//!
//! Mail retrieval, raw-email parsing, and label computation live upstream;
//! the engine takes one normalized [`types::EmailRecord`] at a time plus
//! its already-decided [`types::RankLabels`].
//!
//! # Example
//!
//! ```no_run
//! use mailrank::{CountVectorizer, EmailRecord, OnlineTrainer, RankLabels, WeightStore};
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = WeightStore::open("models");
//! let trainer = OnlineTrainer::new(store, CountVectorizer::new());
//!
//! let email: EmailRecord = serde_json::from_str(r#"{
//!     "from": "alice@example.com",
//!     "to": "bob",
//!     "subject": "quarterly report",
//!     "date": "2024-03-01T09:30:00Z",
//!     "content": "please find attached"
//! }"#)?;
//! trainer.train(&email, &RankLabels::new(0.8, "high", "reply"))?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod scoring;
pub mod store;
pub mod trainer;
pub mod types;
pub mod vectorizer;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::{StoreError, VectorizeError};
pub use store::{UserTables, WeightStore, GLOBAL_USER};
pub use trainer::OnlineTrainer;
pub use types::{EmailRecord, RankLabels};
pub use vectorizer::{CountVectorizer, TermMatrix, Vectorizer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
