//! Error types for conversion operations.

use thiserror::Error;

/// Errors that can occur while converting pages.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid record map: {0}")]
    InvalidRecordMap(String),

    #[error("no page chunk for page {0}")]
    UnknownPage(String),

    #[error("no record map for collection {0}")]
    UnknownCollection(String),

    /// A collaborator call failed while converting a page. Carries enough
    /// context to tell which page and which call sank the conversion.
    #[error("{call} failed for page {page_id}: {source}")]
    Workspace {
        page_id: String,
        call: &'static str,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn workspace(page_id: &str, call: &'static str, source: Error) -> Self {
        Error::Workspace {
            page_id: page_id.to_string(),
            call,
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
