//! Submission of gain errors and cohort grading against a remote store.
//!
//! Records live in a key-value store keyed by student identifier. The HTTP
//! store speaks the Firebase realtime-database REST dialect:
//! `GET {base}.json` for the whole mapping and `PUT {base}/{id}.json` per
//! record.

mod client;
mod grading;
mod store;

pub use client::{compute_errors, ScoringClient};
pub use grading::{compute_grades, curve, extract_errors, save_grades, write_grades};
pub use store::{HttpStore, MemoryStore, RecordStore};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("remote store unavailable: {0}")]
    Remote(String),

    #[error("request to {0} timed out")]
    Timeout(String),

    #[error("remote store returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("remote store returned malformed data: {0}")]
    Malformed(String),

    #[error("no submissions in the store")]
    NoData,

    #[error("no submission carries a numeric \"Avg error\"")]
    NoValidData,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScoringError {
    /// Transport-level failure, nothing was read or written
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ScoringError::Remote(_) | ScoringError::Timeout(_) | ScoringError::Status { .. }
        )
    }
}
