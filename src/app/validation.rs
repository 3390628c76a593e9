use installer_core::catalog::valid_model_filename;

pub(crate) fn valid_model_url(value: &str) -> bool {
    let value = value.trim();
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(rest) => !rest.is_empty() && !rest.chars().any(char::is_whitespace),
        None => false,
    }
}

/// Warning shown under the custom model inputs, if any.
pub(crate) fn custom_model_hint(url: &str, filename: &str) -> Option<&'static str> {
    if url.trim().is_empty() {
        return Some("Enter a model URL, or AI setup will be skipped");
    }
    if !valid_model_url(url) {
        return Some("URL should start with http:// or https://");
    }
    let filename = filename.trim();
    if !filename.is_empty() && !valid_model_filename(filename) {
        return Some("Filename must not contain a path; custom_model.gguf will be used");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_requires_http_scheme_and_host() {
        assert!(valid_model_url(" https://x/y.gguf "));
        assert!(valid_model_url("http://host/m.gguf"));
        assert!(!valid_model_url("https://"));
        assert!(!valid_model_url("ftp://host/m.gguf"));
        assert!(!valid_model_url("https://a b"));
    }

    #[test]
    fn hint_covers_blank_bad_url_and_path_filename() {
        assert!(custom_model_hint("", "").is_some());
        assert!(custom_model_hint("x", "").is_some());
        assert!(custom_model_hint("https://x/y.gguf", "../y.gguf").is_some());
        assert_eq!(custom_model_hint("https://x/y.gguf", ""), None);
        assert_eq!(custom_model_hint("https://x/y.gguf", "y.gguf"), None);
    }
}
