#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Controller was instantiated by the platform layer.
    Started,
    /// User picked (or cleared) the document to enhance.
    DocumentSelected(Option<crate::DocumentFile>),
    /// User edited the job description text.
    JobDescriptionChanged(String),
    /// User pressed the enhance button.
    SubmitClicked,
    /// Engine finished the enhancement request. `Err` carries a displayable reason.
    EnhanceCompleted {
        request_id: crate::RequestId,
        outcome: Result<crate::EnhancementResult, String>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
