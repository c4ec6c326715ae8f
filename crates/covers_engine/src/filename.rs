use covers_core::CoverUrl;

/// On-disk name for a cover: the final path segment of its URL, percent-decoded.
///
/// Returns `None` for names that cannot be written safely as a single file on
/// Windows or Unix.
pub fn cover_filename(url: &CoverUrl) -> Option<String> {
    let decoded = urlencoding::decode(url.file_name()).ok()?;
    let name = decoded.as_ref();
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    if name.chars().any(is_forbidden) || name.ends_with(['.', ' ']) {
        return None;
    }
    let stem = name.split('.').next().unwrap_or(name);
    if is_reserved_windows_name(stem) {
        return None;
    }
    Some(name.to_string())
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
