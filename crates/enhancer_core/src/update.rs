use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            if state.warmup_sent() {
                Vec::new()
            } else {
                state.mark_warmup_sent();
                vec![Effect::Warmup]
            }
        }
        Msg::DocumentSelected(document) => {
            state.set_document(document);
            Vec::new()
        }
        Msg::JobDescriptionChanged(text) => {
            state.set_job_description(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // At most one request in flight; the submit button is disabled meanwhile.
            if state.lifecycle().is_submitting() {
                return (state, Vec::new());
            }
            match state.input().to_request() {
                Ok(request) => {
                    let request_id = state.begin_submission();
                    vec![Effect::Submit {
                        request_id,
                        request,
                    }]
                }
                Err(err) => {
                    state.set_notice(err.to_string());
                    Vec::new()
                }
            }
        }
        Msg::EnhanceCompleted {
            request_id,
            outcome,
        } => {
            state.apply_completion(request_id, outcome);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
