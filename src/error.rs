use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between reading the file and printing the review.
#[derive(Debug, Error)]
pub enum Error {
    /// `--file` was absent or empty
    #[error("no file provided")]
    NoInput,

    #[error("error resolving path: {source}")]
    ResolvePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error converting data to JSON: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("error making request to Ollama: {0}")]
    Request(#[source] reqwest::Error),

    #[error("error reading response from Ollama: {0}")]
    ReadResponse(#[source] reqwest::Error),

    #[error("error unmarshalling response from Ollama: {0}")]
    ParseResponse(#[source] serde_json::Error),
}

impl Error {
    /// Fatal errors end the process with a non-zero status. The rest are
    /// reported to the user and the process exits normally.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::NoInput | Error::ResolvePath { .. } | Error::ReadFile { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
