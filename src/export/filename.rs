use regex::Regex;
use std::sync::LazyLock;

static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).expect("valid pattern"));

static RESERVED_NAMES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(CON|PRN|AUX|NUL|COM[1-9]|LPT[1-9])$").expect("valid pattern")
});

const MAX_STEM_LEN: usize = 200;

/// Sanitize a filename for cross-platform compatibility
/// Removes/replaces characters that are invalid on Windows, macOS, or Linux
pub fn sanitize_filename(name: &str) -> String {
    let sanitized = INVALID_CHARS.replace_all(name, "_");

    // Leading/trailing spaces and dots are trouble on Windows
    let sanitized = sanitized.trim_matches(|c| c == ' ' || c == '.');

    if RESERVED_NAMES.is_match(sanitized) {
        return format!("_{sanitized}");
    }

    let sanitized = truncate_on_char_boundary(sanitized, MAX_STEM_LEN);

    if sanitized.is_empty() {
        "untitled".to_string()
    } else {
        sanitized.to_string()
    }
}

fn truncate_on_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// File name for an export: the configured name, sanitized, with `extension`
/// appended unless it is already there.
pub fn export_file_name(configured: &str, extension: &str) -> String {
    let suffix = format!(".{extension}");
    let stem = configured
        .len()
        .checked_sub(suffix.len())
        .and_then(|split| {
            let tail = configured.get(split..)?;
            tail.eq_ignore_ascii_case(&suffix)
                .then(|| &configured[..split])
        })
        .unwrap_or(configured);
    format!("{}{suffix}", sanitize_filename(stem))
}
