//! Normalization of raw handle input into canonical account handles.

/// Reduce a single raw token to a canonical handle.
///
/// Trims surrounding whitespace and strips one leading `@`. Returns `None`
/// when nothing remains.
#[must_use]
pub fn canonical_handle(raw: &str) -> Option<String> {
    let token = raw.trim();
    let token = token.strip_prefix('@').unwrap_or(token).trim();
    if token.is_empty() { None } else { Some(token.to_string()) }
}

/// Parse free-form input into an ordered list of canonical handles.
///
/// Input is split on any run of whitespace and/or commas. Duplicates are
/// preserved: the caller-visible order and count match what the user typed,
/// and deduplication happens later, at batch-dispatch time.
#[must_use]
pub fn parse_handles(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter_map(canonical_handle)
        .collect()
}
