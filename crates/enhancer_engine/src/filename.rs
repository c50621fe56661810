use url::Url;

const FALLBACK_NAME: &str = "enhanced_resume.docx";

/// Local filename for a downloaded result: the last path segment of `url`,
/// with the query (cache-busting token included) dropped.
pub fn download_filename(url: &str) -> String {
    let segment = Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back().map(ToOwned::to_owned))
        })
        .unwrap_or_default();
    let sanitized = sanitize(&segment);
    if sanitized.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        sanitized
    }
}

fn sanitize(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.chars() {
        let c = if is_forbidden(c) { '_' } else { c };
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        cleaned.push(c);
    }
    let mut name = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if name.chars().count() > 120 {
        name = name.chars().take(120).collect();
    }
    name
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
