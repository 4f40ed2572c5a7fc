//! Deduplication of a candidate brief against recent history.
//!
//! - [`similarity`]: whole-text similarity ratio
//! - [`history`]: loads the last N archived briefs
//! - [`checker`]: title and similarity comparison producing [`DedupIssue`]s
//!
//! [`DedupIssue`]: crate::models::DedupIssue

pub mod checker;
pub mod history;
pub mod similarity;

pub use checker::{DEFAULT_SIMILARITY_THRESHOLD, check};
pub use history::{DEFAULT_LOOKBACK, load_history};
