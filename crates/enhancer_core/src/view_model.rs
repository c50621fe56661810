#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Read-only snapshot of controller state for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: LifecyclePhase,
    /// False while a request is in flight; the submit affordance must be disabled.
    pub submit_enabled: bool,
    pub document_name: Option<String>,
    pub job_description_chars: usize,
    /// Validation feedback from the last rejected submit.
    pub notice: Option<String>,
    pub message: Option<String>,
    pub document_url: Option<String>,
    pub preview_url: Option<String>,
    pub failure: Option<String>,
    pub dirty: bool,
}
