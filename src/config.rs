use anyhow::{anyhow, Result};
use home::home_dir;
use std::env::current_exe;
use std::path::{Path, PathBuf};

pub const DEFAULT_DICTIONARY: &str = "Dictionary.txt";
pub const DEFAULT_STATS: &str = "SearchStats.txt";

/// Replaces a leading $HOME with the user's home directory and a leading
/// $EXE with the directory of the running executable.
pub fn expand_path(path: &Path) -> Option<PathBuf> {
    if let Ok(rest) = path.strip_prefix("$HOME") {
        Some(home_dir()?.join(rest))
    } else if let Ok(rest) = path.strip_prefix("$EXE") {
        match current_exe() {
            Ok(exe) => Some(exe.parent()?.join(rest)),
            Err(_) => None,
        }
    } else {
        Some(path.to_path_buf())
    }
}

pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    expand_path(path).ok_or_else(|| anyhow!("Could not expand path {}", path.display()))
}

/// Settings for one run of the shell.
#[derive(Clone, Debug)]
pub struct Config {
    pub dictionary: PathBuf,
    pub stats: PathBuf,
    /// Session history cap, unlimited if None.
    pub history_limit: Option<usize>,
    /// List searches by count instead of in first-seen order.
    pub rank_searches: bool,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dictionary: PathBuf::from(DEFAULT_DICTIONARY),
            stats: PathBuf::from(DEFAULT_STATS),
            history_limit: None,
            rank_searches: false,
            color: true,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_expand_plain_path() {
        assert_eq!(
            Some(PathBuf::from("dicts/Dictionary.txt")),
            expand_path(Path::new("dicts/Dictionary.txt"))
        );
    }

    #[test]
    fn test_expand_exe_path() {
        let expanded = expand_path(Path::new("$EXE/Dictionary.txt")).unwrap();
        assert!(expanded.ends_with("Dictionary.txt"));
        assert!(!expanded.starts_with("$EXE"));
    }
}
