use std::fmt;

use crate::validate::{validate, ValidationError};
use crate::view_model::{AppViewModel, LifecyclePhase};

pub type RequestId = u64;

/// A user-selected document, held whole in memory until submission.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for DocumentFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("byte_len", &self.bytes.len())
            .finish()
    }
}

/// The two user inputs as currently selected in the UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionInput {
    pub document: Option<DocumentFile>,
    pub job_description: String,
}

impl SubmissionInput {
    /// Validates and snapshots the input into an outgoing request.
    ///
    /// The job description is sent trimmed.
    pub fn to_request(&self) -> Result<EnhanceRequest, ValidationError> {
        validate(self)?;
        let document = self
            .document
            .clone()
            .ok_or(ValidationError::MissingDocument)?;
        Ok(EnhanceRequest {
            document,
            job_description: self.job_description.trim().to_string(),
        })
    }
}

/// A validated submission, ready to be put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhanceRequest {
    pub document: DocumentFile,
    pub job_description: String,
}

/// Artifacts of a successful enhancement. URLs are absolute and cache-busted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancementResult {
    pub message: Option<String>,
    pub document_url: String,
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Idle,
    Submitting,
    Succeeded(EnhancementResult),
    Failed {
        reason: String,
    },
}

impl LifecycleState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, LifecycleState::Submitting)
    }

    pub fn phase(&self) -> LifecyclePhase {
        match self {
            LifecycleState::Idle => LifecyclePhase::Idle,
            LifecycleState::Submitting => LifecyclePhase::Submitting,
            LifecycleState::Succeeded(_) => LifecyclePhase::Succeeded,
            LifecycleState::Failed { .. } => LifecyclePhase::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: SubmissionInput,
    lifecycle: LifecycleState,
    notice: Option<String>,
    last_request_id: RequestId,
    warmup_sent: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &SubmissionInput {
        &self.input
    }

    pub fn lifecycle(&self) -> &LifecycleState {
        &self.lifecycle
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn view(&self) -> AppViewModel {
        let (message, document_url, preview_url, failure) = match &self.lifecycle {
            LifecycleState::Succeeded(result) => (
                result.message.clone(),
                Some(result.document_url.clone()),
                result.preview_url.clone(),
                None,
            ),
            LifecycleState::Failed { reason } => (None, None, None, Some(reason.clone())),
            LifecycleState::Idle | LifecycleState::Submitting => (None, None, None, None),
        };

        AppViewModel {
            phase: self.lifecycle.phase(),
            submit_enabled: !self.lifecycle.is_submitting(),
            document_name: self
                .input
                .document
                .as_ref()
                .map(|doc| doc.file_name.clone()),
            job_description_chars: self.input.job_description.trim().chars().count(),
            notice: self.notice.clone(),
            message,
            document_url,
            preview_url,
            failure,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn warmup_sent(&self) -> bool {
        self.warmup_sent
    }

    pub(crate) fn mark_warmup_sent(&mut self) {
        self.warmup_sent = true;
    }

    pub(crate) fn set_document(&mut self, document: Option<DocumentFile>) {
        self.input = SubmissionInput {
            document,
            job_description: std::mem::take(&mut self.input.job_description),
        };
        self.mark_dirty();
    }

    pub(crate) fn set_job_description(&mut self, text: String) {
        self.input = SubmissionInput {
            document: self.input.document.take(),
            job_description: text,
        };
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
        self.mark_dirty();
    }

    /// Clears any prior result or notice and enters `Submitting` under a fresh id.
    pub(crate) fn begin_submission(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.notice = None;
        self.lifecycle = LifecycleState::Submitting;
        self.mark_dirty();
        self.last_request_id
    }

    /// Applies a completion for the in-flight request; stale or unexpected ids are ignored.
    pub(crate) fn apply_completion(
        &mut self,
        request_id: RequestId,
        outcome: Result<EnhancementResult, String>,
    ) -> bool {
        if !self.lifecycle.is_submitting() || request_id != self.last_request_id {
            return false;
        }
        self.lifecycle = match outcome {
            Ok(result) => LifecycleState::Succeeded(result),
            Err(reason) => LifecycleState::Failed { reason },
        };
        self.mark_dirty();
        true
    }
}
