//! URL normalization applied to url-typed fields at submit time.
//!
//! Never applied while editing, so the live preview shows the value exactly
//! as typed.

/// Prefixes `https://` when the trimmed value has no scheme. Empty input
/// stays empty. Idempotent.
pub fn normalize_url(url: &str) -> String {
    let clean = url.trim();
    if clean.is_empty() {
        return String::new();
    }
    if clean.starts_with("http://") || clean.starts_with("https://") {
        return clean.to_string();
    }
    format!("https://{clean}")
}
