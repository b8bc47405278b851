//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted at `/host`, which points
//! at the directory Zellij was started from (usually the user's home).

use std::path::PathBuf;

/// Directory for plugin-owned files (trace output):
/// `/host/.local/share/zellij/zsfile`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zsfile")
}

/// Maps a `~`-prefixed path onto the sandbox mount.
///
/// ```
/// use zsfile::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_leading_home_tilde_expands() {
        assert_eq!(expand_tilde("~user/x"), "~user/x");
        assert_eq!(expand_tilde("a/~/b"), "a/~/b");
        assert!(get_data_dir().ends_with("zsfile"));
    }
}
