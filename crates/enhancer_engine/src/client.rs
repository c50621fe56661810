use enhancer_logging::{enhancer_debug, enhancer_info, enhancer_warn};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};

use crate::interpret::interpret;
use crate::{
    EngineConfig, EnhanceError, EnhanceRequest, EnhancementResult, TransportError,
    TransportErrorKind, UrlResolver,
};

/// Multipart field carrying the document.
pub const RESUME_FIELD: &str = "resume";
/// Multipart field carrying the job description. The backend also accepts
/// `job_description`; this client always sends the canonical name.
pub const JOB_DESCRIPTION_FIELD: &str = "jobDescription";

const ENHANCE_PATH: &str = "/enhance";

#[async_trait::async_trait]
pub trait EnhancementClient: Send + Sync {
    /// Best-effort readiness probe. Never fails from the caller's point of view.
    async fn warmup(&self);

    async fn enhance(&self, request: &EnhanceRequest) -> Result<EnhancementResult, EnhanceError>;

    async fn download(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestEnhancementClient {
    config: EngineConfig,
    resolver: UrlResolver,
    client: reqwest::Client,
}

impl ReqwestEnhancementClient {
    pub fn new(config: EngineConfig) -> Result<Self, TransportError> {
        // No overall timeout: a slow enhancement only fails at the transport level.
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| TransportError::new(TransportErrorKind::Network, err.to_string()))?;
        let resolver = config.url_resolver();
        Ok(Self {
            config,
            resolver,
            client,
        })
    }

    fn build_form(request: &EnhanceRequest) -> Result<Form, TransportError> {
        let part = Part::bytes(request.document.clone())
            .file_name(request.file_name.clone())
            .mime_str(&request.mime_type)
            .map_err(|err| TransportError::new(TransportErrorKind::InvalidRequest, err.to_string()))?;
        Ok(Form::new()
            .part(RESUME_FIELD, part)
            .text(JOB_DESCRIPTION_FIELD, request.job_description.clone()))
    }
}

#[async_trait::async_trait]
impl EnhancementClient for ReqwestEnhancementClient {
    async fn warmup(&self) {
        let url = self.config.endpoint("/");
        let outcome = self
            .client
            .get(&url)
            .timeout(self.config.warmup_timeout)
            .send()
            .await;
        match outcome {
            Ok(response) => enhancer_debug!("warmup {} answered {}", url, response.status()),
            Err(err) => enhancer_debug!("warmup {} ignored: {}", url, err),
        }
    }

    async fn enhance(&self, request: &EnhanceRequest) -> Result<EnhancementResult, EnhanceError> {
        let url = self.config.endpoint(ENHANCE_PATH);
        let form = Self::build_form(request)?;
        enhancer_info!(
            "POST {} file={} bytes={} jd_chars={}",
            url,
            request.file_name,
            request.document.len(),
            request.job_description.chars().count()
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        match interpret(status, &body, &self.resolver) {
            Ok(result) => {
                enhancer_info!("enhance succeeded (HTTP {}) document={}", status, result.document_url);
                Ok(result)
            }
            Err(err) => {
                enhancer_warn!("enhance failed (HTTP {}): {}", status, err);
                Err(err.into())
            }
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| TransportError::new(TransportErrorKind::InvalidUrl, err.to_string()))?;
        let max_bytes = self.config.max_download_bytes;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                TransportErrorKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(TransportError::new(
                    TransportErrorKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "document too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(TransportError::new(
                    TransportErrorKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "document too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        enhancer_debug!("downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(TransportErrorKind::Timeout, err.to_string());
    }
    if err.is_connect() {
        return TransportError::new(TransportErrorKind::Connect, err.to_string());
    }
    if err.is_builder() {
        return TransportError::new(TransportErrorKind::InvalidUrl, err.to_string());
    }
    TransportError::new(TransportErrorKind::Network, err.to_string())
}
