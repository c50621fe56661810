use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use enhancer_core::DocumentFile;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const DOC_MIME: &str = "application/msword";
const PDF_MIME: &str = "application/pdf";
const FALLBACK_MIME: &str = "application/octet-stream";

/// Reads the selected resume into memory, or `None` when nothing was selected.
pub fn load_document(path: Option<&Path>) -> Result<Option<DocumentFile>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let bytes = fs::read(path).with_context(|| format!("reading resume {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume.docx".to_string());

    Ok(Some(DocumentFile {
        mime_type: mime_for(&file_name).to_string(),
        file_name,
        bytes,
    }))
}

/// Job description from the inline flag, a file, or stdin (`-`). Missing means empty.
pub fn load_job_description(inline: Option<&str>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = inline {
        return Ok(text.to_string());
    }
    match file {
        Some(path) if path.as_os_str() == "-" => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading job description from stdin")?;
            Ok(text)
        }
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading job description {}", path.display())),
        None => Ok(String::new()),
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("docx") => DOCX_MIME,
        Some("doc") => DOC_MIME,
        Some("pdf") => PDF_MIME,
        _ => FALLBACK_MIME,
    }
}
