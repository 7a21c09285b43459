//! Path helpers for the Zellij sandbox.

use std::path::PathBuf;

/// Directory holding the plugin's span log.
///
/// `/host` is the cwd of the last focused terminal (usually the user's home),
/// so this normally resolves to `~/.local/share/zellij/poemseek`.
///
/// # Examples
///
/// ```
/// use poemseek::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/poemseek"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("poemseek")
}

/// Rewrites a leading `~` to the sandbox's `/host` mount.
///
/// `~user/...` forms are left alone; the sandbox only knows one home.
///
/// # Examples
///
/// ```
/// use poemseek::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
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
    fn tilde_only_expands_at_the_start() {
        assert_eq!(expand_tilde("themes/~/x.toml"), "themes/~/x.toml");
        assert_eq!(expand_tilde("~alice/x.toml"), "~alice/x.toml");
        assert_eq!(expand_tilde("~/"), "/host/");
    }
}
