use serde_json::{Map, Value};

use crate::{EnhancementResult, InterpretError, UrlResolver};

/// How much of an unparseable body is kept for diagnostics.
pub const EXCERPT_CHARS: usize = 200;

const SUCCESS_STATUS: &str = "success";

/// Classifies a completed exchange with the enhancement endpoint.
///
/// Unparseable bodies (HTML error pages, plain text) are a normal failure,
/// never a panic. A success payload without a document URL is rejected.
pub fn interpret(
    status: u16,
    body: &str,
    resolver: &UrlResolver,
) -> Result<EnhancementResult, InterpretError> {
    let Some(payload) = parse_payload(body) else {
        return Err(InterpretError::NonStructuredResponse {
            status,
            excerpt: body.chars().take(EXCERPT_CHARS).collect(),
        });
    };

    let message = text_field(&payload, "message").map(str::to_string);
    let is_success_status = (200..300).contains(&status);
    if !is_success_status || text_field(&payload, "status") != Some(SUCCESS_STATUS) {
        return Err(InterpretError::BackendReportedFailure {
            status,
            message: message.unwrap_or_else(|| format!("HTTP {status}")),
        });
    }

    let Some(docx_url) = text_field(&payload, "docx_url").filter(|url| !url.trim().is_empty())
    else {
        return Err(InterpretError::BackendReportedFailure {
            status,
            message: "backend reported success without a document URL".to_string(),
        });
    };

    let preview_url = text_field(&payload, "pdf_url")
        .filter(|url| !url.trim().is_empty())
        .map(|url| resolver.resolve(url, true));

    Ok(EnhancementResult {
        message,
        document_url: resolver.resolve(docx_url, true),
        preview_url,
    })
}

// Only a JSON object counts as structured; arrays and scalars do not.
fn parse_payload(body: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(body).ok()? {
        Value::Object(fields) => Some(fields),
        _ => None,
    }
}

// A field that is missing, empty, or not a string is absent.
fn text_field<'a>(payload: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}
