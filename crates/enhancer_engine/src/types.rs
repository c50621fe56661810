use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::persist::PersistError;

pub type RequestId = u64;

/// Outgoing multipart submission.
#[derive(Clone, PartialEq, Eq)]
pub struct EnhanceRequest {
    pub file_name: String,
    pub mime_type: String,
    pub document: Vec<u8>,
    pub job_description: String,
}

impl fmt::Debug for EnhanceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnhanceRequest")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("document_len", &self.document.len())
            .field("job_description_len", &self.job_description.len())
            .finish()
    }
}

/// Resolved artifacts returned by a successful enhancement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancementResult {
    pub message: Option<String>,
    pub document_url: String,
    pub preview_url: Option<String>,
}

#[derive(Debug)]
pub enum EngineEvent {
    EnhanceCompleted {
        request_id: RequestId,
        result: Result<EnhancementResult, EnhanceError>,
    },
    DocumentSaved {
        save_id: u64,
        result: Result<PathBuf, SaveError>,
    },
}

/// Failure at the network boundary: nothing usable came back from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub(crate) fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportErrorKind {
    InvalidUrl,
    InvalidRequest,
    Connect,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::InvalidUrl => write!(f, "invalid url"),
            TransportErrorKind::InvalidRequest => write!(f, "invalid request"),
            TransportErrorKind::Connect => write!(f, "connection failed"),
            TransportErrorKind::Timeout => write!(f, "timeout"),
            TransportErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            TransportErrorKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            TransportErrorKind::Network => write!(f, "network error"),
        }
    }
}

/// Failure derived from a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretError {
    #[error("Non-JSON response (HTTP {status}): {excerpt}")]
    NonStructuredResponse { status: u16, excerpt: String },
    #[error("{message}")]
    BackendReportedFailure { status: u16, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnhanceError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Interpret(#[from] InterpretError),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("download failed: {0}")]
    Transport(#[from] TransportError),
    #[error("could not write document: {0}")]
    Persist(#[from] PersistError),
}
