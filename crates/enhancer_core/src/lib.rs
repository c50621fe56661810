//! Enhancer core: pure request-lifecycle state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, DocumentFile, EnhanceRequest, EnhancementResult, LifecycleState, RequestId,
    SubmissionInput,
};
pub use update::update;
pub use validate::{validate, ValidationError};
pub use view_model::{AppViewModel, LifecyclePhase};
