//! # Motstore - MOT Detection Ingest
//!
//! Loads MOTChallenge-style detection files into memory and serves
//! per-frame detections to a downstream multi-object tracker.
//!
//! ## Features
//!
//! - Permissive line-oriented parsing: malformed lines are skipped, never fatal
//! - O(1) per-frame lookup returning fixed-shape `(N, 5)` arrays
//! - `seqinfo.ini` sequence metadata parsing
//! - Dense frame iteration over whole sequences, empty frames included
//!
//! ## Example
//!
//! ```rust,ignore
//! use motstore::DetectionStore;
//!
//! let store = DetectionStore::from_path("MOT17-02/det/det.txt")?;
//!
//! // Rows are [x1, y1, x2, y2, score]; unknown frames yield a (0, 5) array.
//! let boxes = store.get(1);
//! for row in boxes.row_iter() {
//!     println!("box ({}, {}) .. ({}, {}) score {}", row[0], row[1], row[2], row[3], row[4]);
//! }
//! ```

pub mod record;
pub mod seqinfo;
pub mod sequence;
pub mod store;

// Re-exports for convenience
pub use record::Detection;
pub use seqinfo::SequenceInfo;
pub use sequence::Sequence;
pub use store::{DetectionStore, Frames};

// Error types
pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur while loading detection data.
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("missing '{key}' in sequence info file '{path}'")]
        MissingKey { key: String, path: String },

        #[error("invalid value '{value}' for '{key}' in sequence info file '{path}'")]
        InvalidValue {
            key: String,
            value: String,
            path: String,
        },

        #[error("IO error: {0}")]
        IoError(#[from] std::io::Error),
    }

    /// Result type for motstore operations
    pub type Result<T> = std::result::Result<T, Error>;
}
