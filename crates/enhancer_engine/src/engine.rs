use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use enhancer_logging::{enhancer_debug, enhancer_warn};
use thiserror::Error;

use crate::client::{EnhancementClient, ReqwestEnhancementClient};
use crate::filename::download_filename;
use crate::persist::AtomicFileWriter;
use crate::{EngineConfig, EngineEvent, EnhanceRequest, RequestId, SaveError, TransportError};

#[derive(Debug, Error)]
pub enum EngineStartError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] TransportError),
}

/// The background thread is gone; no further events will arrive.
#[derive(Debug, Error)]
#[error("engine stopped")]
pub struct EngineStopped;

enum EngineCommand {
    Warmup,
    Enhance {
        request_id: RequestId,
        request: EnhanceRequest,
    },
    Save {
        save_id: u64,
        url: String,
        output_dir: PathBuf,
    },
}

/// Handle to the background IO thread. Commands are executed as independent
/// tasks, so a warm-up probe never delays an enhancement.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineStartError> {
        let client = ReqwestEnhancementClient::new(config)?;
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<dyn EnhancementClient>) -> Result<Self, EngineStartError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
            enhancer_debug!("engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn warmup(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Warmup);
    }

    pub fn enhance(&self, request_id: RequestId, request: EnhanceRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Enhance {
            request_id,
            request,
        });
    }

    /// Downloads `url` into `output_dir`, reported as [`EngineEvent::DocumentSaved`].
    pub fn save_document(&self, save_id: u64, url: impl Into<String>, output_dir: PathBuf) {
        let _ = self.cmd_tx.send(EngineCommand::Save {
            save_id,
            url: url.into(),
            output_dir,
        });
    }

    /// `Ok(None)` when nothing arrived within `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineStopped> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineStopped),
        }
    }
}

async fn handle_command(
    client: &dyn EnhancementClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Warmup => client.warmup().await,
        EngineCommand::Enhance {
            request_id,
            request,
        } => {
            let result = client.enhance(&request).await;
            let _ = event_tx.send(EngineEvent::EnhanceCompleted { request_id, result });
        }
        EngineCommand::Save {
            save_id,
            url,
            output_dir,
        } => {
            let result = save_document(client, &url, output_dir).await;
            if let Err(err) = &result {
                enhancer_warn!("saving {} failed: {}", url, err);
            }
            let _ = event_tx.send(EngineEvent::DocumentSaved { save_id, result });
        }
    }
}

async fn save_document(
    client: &dyn EnhancementClient,
    url: &str,
    output_dir: PathBuf,
) -> Result<PathBuf, SaveError> {
    let bytes = client.download(url).await?;
    let writer = AtomicFileWriter::new(output_dir);
    Ok(writer.write(&download_filename(url), &bytes)?)
}
