//! Content loading errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Invalid content document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Content document has no posts")]
    NoPosts,
}
