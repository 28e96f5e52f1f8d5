//! Small helpers shared by config, identity, forms and the REST clients.

/// Longest response-body excerpt carried into an error message
pub const ERROR_EXCERPT_CHARS: usize = 180;

/// Trimmed text, or `None` when nothing but whitespace is left.
pub fn non_blank(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Owned [`non_blank`] for optional config and profile fields.
pub fn non_blank_owned(value: Option<&str>) -> Option<String> {
    value.and_then(non_blank).map(str::to_string)
}

/// Base URL of a REST endpoint: scheme required, trailing slashes dropped.
pub fn endpoint_base(value: &str) -> Option<&str> {
    let value = non_blank(value)?;
    (value.starts_with("https://") || value.starts_with("http://"))
        .then(|| value.trim_end_matches('/'))
}

/// Head of a response body, for errors the API did not describe itself.
pub fn error_excerpt(body: &str) -> String {
    body.trim().chars().take(ERROR_EXCERPT_CHARS).collect()
}

/// Seconds since the epoch; token expiry is tracked in this unit.
pub fn now_seconds() -> i64 {
    chrono::Utc::now().timestamp()
}
