//! Enhancer engine: backend IO and effect execution.
mod client;
mod config;
mod engine;
mod filename;
mod interpret;
mod persist;
mod resolve;
mod types;

pub use client::{EnhancementClient, ReqwestEnhancementClient, JOB_DESCRIPTION_FIELD, RESUME_FIELD};
pub use config::{CacheTokenFn, ConfigError, EngineConfig};
pub use engine::{EngineHandle, EngineStartError, EngineStopped};
pub use filename::download_filename;
pub use interpret::{interpret, EXCERPT_CHARS};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use resolve::{current_cache_token, resolve, resolve_with_token, UrlResolver, CACHE_BUST_PARAM};
pub use types::{
    EngineEvent, EnhanceError, EnhanceRequest, EnhancementResult, InterpretError, RequestId,
    SaveError, TransportError, TransportErrorKind,
};
