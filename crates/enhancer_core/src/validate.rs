use thiserror::Error;

use crate::SubmissionInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a .docx resume.")]
    MissingDocument,
    #[error("Please paste a job description.")]
    MissingJobDescription,
}

impl ValidationError {
    /// Name of the input field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingDocument => "document",
            ValidationError::MissingJobDescription => "job_description",
        }
    }
}

/// Checks that both inputs are present before any network activity.
///
/// The document is checked first; a whitespace-only job description counts as missing.
pub fn validate(input: &SubmissionInput) -> Result<(), ValidationError> {
    if input.document.is_none() {
        return Err(ValidationError::MissingDocument);
    }
    if input.job_description.trim().is_empty() {
        return Err(ValidationError::MissingJobDescription);
    }
    Ok(())
}
