//! Path utilities for locating the jar's data directory.
//!
//! Notes, the default configuration file and the diagnostic log all live in
//! one directory. Resolution follows the XDG convention with a home-directory
//! fallback and, as a last resort, a hidden directory in the working directory.

use std::ffi::OsString;
use std::path::PathBuf;

/// Name of the per-user data directory.
const APP_DIR: &str = "emotion-jar";

/// Returns the data directory for emotion jar storage.
///
/// Resolves to `$XDG_DATA_HOME/emotion-jar`, then
/// `$HOME/.local/share/emotion-jar`, then `./.emotion-jar`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    data_dir_from(std::env::var_os("XDG_DATA_HOME"), std::env::var_os("HOME"))
}

fn data_dir_from(xdg_data_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
    if let Some(xdg) = xdg_data_home.filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join(APP_DIR);
    }
    if let Some(home) = home.filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".local").join("share").join(APP_DIR);
    }
    PathBuf::from(format!(".{APP_DIR}"))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde prefix, and every path when `HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use emotion_jar::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, std::env::var_os("HOME"))
}

fn expand_tilde_with(path: &str, home: Option<OsString>) -> PathBuf {
    let Some(home) = home.filter(|v| !v.is_empty()) else {
        return PathBuf::from(path);
    };
    if path == "~" {
        PathBuf::from(home)
    } else if let Some(rest) = path.strip_prefix("~/") {
        PathBuf::from(home).join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_xdg_data_home() {
        let dir = data_dir_from(Some("/xdg".into()), Some("/home/me".into()));
        assert_eq!(dir, PathBuf::from("/xdg/emotion-jar"));
    }

    #[test]
    fn falls_back_to_home_then_cwd() {
        let dir = data_dir_from(Some("".into()), Some("/home/me".into()));
        assert_eq!(dir, PathBuf::from("/home/me/.local/share/emotion-jar"));
        assert_eq!(data_dir_from(None, None), PathBuf::from(".emotion-jar"));
    }

    #[test]
    fn expands_only_leading_tilde() {
        let home = Some(OsString::from("/home/me"));
        assert_eq!(expand_tilde_with("~", home.clone()), PathBuf::from("/home/me"));
        assert_eq!(
            expand_tilde_with("~/jar/config.toml", home.clone()),
            PathBuf::from("/home/me/jar/config.toml")
        );
        assert_eq!(expand_tilde_with("a/~/b", home), PathBuf::from("a/~/b"));
        assert_eq!(expand_tilde_with("~/x", None), PathBuf::from("~/x"));
    }
}
