use std::path::PathBuf;
use std::time::Duration;

use enhancer_core::{Effect, EnhanceRequest, EnhancementResult, Msg};
use enhancer_engine::{EngineEvent, EngineHandle, EngineStopped};
use enhancer_logging::{enhancer_info, enhancer_warn};

/// Outcome of a local save, reported back to the app loop.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Failed(String),
}

/// Something the app loop must react to.
#[derive(Debug)]
pub enum RunnerEvent {
    Msg(Msg),
    Save {
        save_id: u64,
        outcome: SaveOutcome,
    },
}

pub struct EffectRunner {
    engine: EngineHandle,
    warmup_enabled: bool,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, warmup_enabled: bool) -> Self {
        Self {
            engine,
            warmup_enabled,
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Warmup => {
                    if self.warmup_enabled {
                        self.engine.warmup();
                    }
                }
                Effect::Submit {
                    request_id,
                    request,
                } => {
                    enhancer_info!(
                        "Submit request_id={} file={} jd_chars={}",
                        request_id,
                        request.document.file_name,
                        request.job_description.chars().count()
                    );
                    self.engine.enhance(request_id, map_request(request));
                }
            }
        }
    }

    pub fn save_document(&self, save_id: u64, url: &str, output_dir: PathBuf) {
        self.engine.save_document(save_id, url, output_dir);
    }

    pub fn next_event(&self, timeout: Duration) -> Result<Option<RunnerEvent>, EngineStopped> {
        Ok(self.engine.recv_timeout(timeout)?.map(map_event))
    }
}

fn map_request(request: EnhanceRequest) -> enhancer_engine::EnhanceRequest {
    enhancer_engine::EnhanceRequest {
        file_name: request.document.file_name,
        mime_type: request.document.mime_type,
        document: request.document.bytes,
        job_description: request.job_description,
    }
}

fn map_event(event: EngineEvent) -> RunnerEvent {
    match event {
        EngineEvent::EnhanceCompleted { request_id, result } => {
            let outcome = match result {
                Ok(result) => Ok(map_result(result)),
                Err(err) => {
                    enhancer_warn!("Request {} failed: {}", request_id, err);
                    Err(err.to_string())
                }
            };
            RunnerEvent::Msg(Msg::EnhanceCompleted {
                request_id,
                outcome,
            })
        }
        EngineEvent::DocumentSaved { save_id, result } => RunnerEvent::Save {
            save_id,
            outcome: match result {
                Ok(path) => SaveOutcome::Saved(path),
                Err(err) => SaveOutcome::Failed(err.to_string()),
            },
        },
    }
}

fn map_result(result: enhancer_engine::EnhancementResult) -> EnhancementResult {
    EnhancementResult {
        message: result.message,
        document_url: result.document_url,
        preview_url: result.preview_url,
    }
}
