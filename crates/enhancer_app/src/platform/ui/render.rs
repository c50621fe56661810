use enhancer_core::{AppViewModel, LifecyclePhase};

/// Renders the view model as terminal lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(notice) = &view.notice {
        lines.push(format!("! {notice}"));
    }

    match view.phase {
        LifecyclePhase::Idle => {
            let document = view.document_name.as_deref().unwrap_or("none selected");
            lines.push(format!(
                "Resume: {document} | Job description: {} chars",
                view.job_description_chars
            ));
        }
        LifecyclePhase::Submitting => {
            lines.push("Enhancing...".to_string());
        }
        LifecyclePhase::Succeeded => {
            if let Some(message) = &view.message {
                lines.push(message.clone());
            }
            if let Some(preview) = &view.preview_url {
                lines.push(format!("Preview: {preview}"));
            }
            if let Some(document) = &view.document_url {
                lines.push(format!("Download Enhanced Resume (Word File): {document}"));
            }
        }
        LifecyclePhase::Failed => {
            let reason = view.failure.as_deref().unwrap_or("Unknown error");
            lines.push(format!("Enhance failed: {reason}"));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use enhancer_core::{AppViewModel, LifecyclePhase};

    use super::render;

    #[test]
    fn idle_shows_inputs_and_notice() {
        let view = AppViewModel {
            phase: LifecyclePhase::Idle,
            submit_enabled: true,
            notice: Some("Please upload a .docx resume.".to_string()),
            job_description_chars: 12,
            ..AppViewModel::default()
        };

        assert_eq!(
            render(&view),
            vec![
                "! Please upload a .docx resume.".to_string(),
                "Resume: none selected | Job description: 12 chars".to_string(),
            ]
        );
    }

    #[test]
    fn success_lists_preview_before_download() {
        let view = AppViewModel {
            phase: LifecyclePhase::Succeeded,
            submit_enabled: true,
            message: Some("Resume enhanced".to_string()),
            document_url: Some("https://api.example.com/out/r.docx?ts=1".to_string()),
            preview_url: Some("https://api.example.com/out/r.pdf?ts=1".to_string()),
            ..AppViewModel::default()
        };

        assert_eq!(
            render(&view),
            vec![
                "Resume enhanced".to_string(),
                "Preview: https://api.example.com/out/r.pdf?ts=1".to_string(),
                "Download Enhanced Resume (Word File): https://api.example.com/out/r.docx?ts=1"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn failure_shows_reason() {
        let view = AppViewModel {
            phase: LifecyclePhase::Failed,
            submit_enabled: true,
            failure: Some("bad file".to_string()),
            ..AppViewModel::default()
        };

        assert_eq!(render(&view), vec!["Enhance failed: bad file".to_string()]);
    }

    #[test]
    fn submitting_shows_progress() {
        let view = AppViewModel {
            phase: LifecyclePhase::Submitting,
            ..AppViewModel::default()
        };
        assert_eq!(render(&view), vec!["Enhancing...".to_string()]);
    }
}
