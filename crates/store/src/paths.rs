use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "tagdex";
pub const TAGS_FILE_NAME: &str = "tags.json";
pub const TAGS_FILE_ENV: &str = "TAGDEX_TAGS_FILE";

const LOCK_FILE_NAME: &str = "tags.lock";
const HOME_FALLBACK_DIR_NAME: &str = ".tagdex";

/// Per-user location of the tags file.
///
/// `$TAGDEX_TAGS_FILE` wins when set; otherwise the platform config dir
/// (`~/.config/tagdex/tags.json`, `%APPDATA%\tagdex\tags.json`, ...), falling
/// back to `~/.tagdex/tags.json` on systems without one.
#[must_use]
pub fn default_tags_file_path() -> Option<PathBuf> {
    if let Ok(raw) = std::env::var(TAGS_FILE_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    if let Some(config) = dirs::config_dir() {
        return Some(config.join(APP_DIR_NAME).join(TAGS_FILE_NAME));
    }
    let home = dirs::home_dir()?;
    Some(home.join(HOME_FALLBACK_DIR_NAME).join(TAGS_FILE_NAME))
}

/// Advisory lock file guarding writes to `tags_file`. Lives next to it so
/// every process sharing the file agrees on the lock.
#[must_use]
pub fn lock_path_for_tags_file(tags_file: &Path) -> PathBuf {
    match tags_file.parent() {
        Some(dir) => dir.join(LOCK_FILE_NAME),
        None => PathBuf::from(LOCK_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_file_is_a_sibling() {
        assert_eq!(
            lock_path_for_tags_file(Path::new("/cfg/tagdex/tags.json")),
            PathBuf::from("/cfg/tagdex/tags.lock")
        );
    }
}
