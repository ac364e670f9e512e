use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;

/// Markers that introduce a secret-like token in provider error bodies.
/// Prefix tokens (`gsk_`, `sk-`) are Groq/OpenAI-style key prefixes; the rest
/// are header/query/json forms a proxy might echo back.
const SECRET_MARKERS: [&str; 9] = [
    "gsk_",
    "sk-",
    "api_key=",
    "access_token=",
    "Authorization: Bearer ",
    "authorization: bearer ",
    "\"api_key\":\"",
    "\"access_token\":\"",
    "\"authorization\":\"Bearer ",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

/// Index just past the run of secret characters starting at `from`.
fn token_end(input: &str, from: usize) -> usize {
    input[from..]
        .char_indices()
        .take_while(|(_, c)| is_secret_char(*c))
        .last()
        .map_or(from, |(i, c)| from + i + c.len_utf8())
}

/// Scrub known secret-like token patterns from backend error strings.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    if !SECRET_MARKERS.iter().any(|m| input.contains(m)) {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in SECRET_MARKERS {
        let mut search_from = 0;
        while let Some(rel) = scrubbed[search_from..].find(marker) {
            let start = search_from + rel;
            let content_start = start + marker.len();
            let end = token_end(&scrubbed, content_start);

            // Bare marker with no token value attached.
            if end == content_start {
                search_from = content_start;
                continue;
            }

            scrubbed.replace_range(start..end, "[REDACTED]");
            search_from = start + "[REDACTED]".len();
        }
    }

    Cow::Owned(scrubbed)
}

/// Sanitize API error text by scrubbing secrets and truncating length.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);

    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed.into_owned();
    }

    let scrubbed = scrubbed.as_ref();
    let mut end = MAX_API_ERROR_CHARS;
    while end > 0 && !scrubbed.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &scrubbed[..end])
}
