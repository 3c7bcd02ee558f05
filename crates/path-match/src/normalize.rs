/// Canonical comparison form: forward slashes, no repeated separators,
/// lower case.
#[must_use]
pub fn normalize_for_compare(path: &str) -> String {
    collapse_slashes(&path.replace('\\', "/")).to_lowercase()
}

/// Form a path is persisted in. Doubled backslashes (an artifact of
/// escaping on the host side) become single ones and runs of `/` collapse.
/// Case and separator style are preserved.
#[must_use]
pub fn normalize_for_storage(path: &str) -> String {
    collapse_slashes(&path.replace("\\\\", "\\"))
}

pub(crate) fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for ch in path.chars() {
        if ch == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(ch);
    }
    out
}

/// Strips a leading `<letter>:/` drive prefix from an already normalized
/// path.
pub(crate) fn strip_drive_prefix(normalized: &str) -> &str {
    let bytes = normalized.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
    {
        &normalized[3..]
    } else {
        normalized
    }
}

/// Strips exactly one trailing `/`.
pub(crate) fn strip_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}
