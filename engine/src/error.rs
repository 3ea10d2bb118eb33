use std::{path::PathBuf, time::Duration};

use reqwest::StatusCode;
use thiserror::Error;

/// Why a single generation attempt did not produce a file
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The service understood the request but refused or failed it
    #[error("Generation failed: {0}")]
    Service(String),

    #[error("No images in response")]
    NoImages,

    #[error("Request timed out (>{0:?})")]
    Timeout(Duration),

    #[error("Error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Error: invalid JSON in response ({status}): {source}")]
    MalformedResponse {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error: first image has no b64_json payload")]
    MissingPayload,

    #[error("Error: invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Error: could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Service,
    Empty,
    Timeout,
    Fault,
}

impl GenerationError {
    pub(crate) fn from_transport(err: reqwest::Error, bound: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(bound)
        } else {
            Self::Transport(err)
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Service(_) => FailureKind::Service,
            Self::NoImages => FailureKind::Empty,
            Self::Timeout(_) => FailureKind::Timeout,
            Self::Transport(_)
            | Self::MalformedResponse { .. }
            | Self::MissingPayload
            | Self::Decode(_)
            | Self::Io { .. } => FailureKind::Fault,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn timeout_message_names_the_bound() {
        let err = GenerationError::Timeout(Duration::from_secs(60));
        assert_eq!(err.to_string(), "Request timed out (>60s)");
        assert_eq!(err.kind(), FailureKind::Timeout);

        let err = GenerationError::Timeout(Duration::from_millis(200));
        assert_eq!(err.to_string(), "Request timed out (>200ms)");
    }

    #[test]
    fn faults_carry_the_underlying_description() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = GenerationError::Io {
            path: PathBuf::from("/out/a.png"),
            source,
        };
        assert_eq!(err.to_string(), "Error: could not write /out/a.png: denied");
        assert_eq!(err.kind(), FailureKind::Fault);
    }
}
