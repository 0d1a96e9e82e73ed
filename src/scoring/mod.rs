//! Incremental weight-update rules
//!
//! One module per update rule, each a pure mutation of an in-memory table:
//! - [`sender`]: log-domain engagement counter per sender
//! - [`thread`]: recurrence/velocity weight per conversation thread
//! - [`terms`]: term-weight projection for the thread-subject and
//!   message-content vocabularies

pub mod sender;
pub mod terms;
pub mod thread;
