use crate::{EnhanceRequest, RequestId};

/// Side effects requested by [`crate::update`]; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Best-effort readiness probe against the backend root.
    Warmup,
    /// Upload the document and job description to the enhancement endpoint.
    Submit {
        request_id: RequestId,
        request: EnhanceRequest,
    },
}
