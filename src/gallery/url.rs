//! Building API URLs and resolving the URLs the store hands back

/// Collapse every run of slashes that follows a non-`:` character down to a
/// single slash. `http://` survives; `host//path` does not.
pub fn collapse_slashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch == '/' && out.ends_with('/') {
            let mut back = out.chars().rev();
            back.next();
            if matches!(back.next(), Some(prev) if prev != ':') {
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// `http://` or `https://`, any case
pub fn is_absolute(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// `{base}/api{path}`
pub fn api_url(base: &str, path: &str) -> String {
    let sep = if path.starts_with('/') { "" } else { "/" };
    collapse_slashes(&format!("{}/api{}{}", base, sep, path))
}

/// Resolve a store-returned URL against `base`. Absolute and empty URLs
/// pass through unchanged.
pub fn normalize_url(base: &str, url: &str) -> String {
    if url.is_empty() || is_absolute(url) {
        return url.to_string();
    }
    let sep = if url.starts_with('/') { "" } else { "/" };
    collapse_slashes(&format!("{}{}{}", base, sep, url))
}
