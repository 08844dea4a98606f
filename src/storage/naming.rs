use std::path::Path;

/// Generates the stored blob name for an uploaded file:
/// `<unix_ms_timestamp>_<original_filename>`.
///
/// Pure in the clock value so callers pass `Utc::now().timestamp_millis()`
/// and tests pass a constant. Two uploads of the same filename within the
/// same millisecond collide; that risk is accepted, not guarded.
pub fn stored_filename(original: &str, now_ms: i64) -> String {
    format!("{}_{}", now_ms, sanitize(original))
}

/// Reduces a client-supplied filename to a single safe path component.
pub fn sanitize(original: &str) -> String {
    let base = Path::new(original)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("file");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_control() || matches!(c, '/' | '\\') {
                '_'
            } else {
                c
            }
        })
        .collect();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        "file".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_filename_layout() {
        assert_eq!(
            stored_filename("notes.pdf", 1700000000123),
            "1700000000123_notes.pdf"
        );
    }

    #[test]
    fn test_stored_filename_is_deterministic() {
        let a = stored_filename("toc.pdf", 42);
        let b = stored_filename("toc.pdf", 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize("../../etc/passwd"), "passwd");
        assert_eq!(sanitize("dir/inner.pdf"), "inner.pdf");
        // backslash is not a separator on unix; it gets neutralized instead
        assert_eq!(sanitize("..\\win\\style.pdf"), ".._win_style.pdf");
    }

    #[test]
    fn test_sanitize_degenerate_names() {
        assert_eq!(sanitize(""), "file");
        assert_eq!(sanitize(".."), "file");
        assert_eq!(sanitize("a\nb.pdf"), "a_b.pdf");
    }
}
