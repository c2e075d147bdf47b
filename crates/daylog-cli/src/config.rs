//! Configuration loading and management.

use std::path::{Path, PathBuf};

use daylog_core::KeywordPattern;
use daylog_core::summary::default_keyword_patterns;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the activity log.
    pub log_path: PathBuf,

    /// Descriptions per page in `daylog details`.
    pub page_size: usize,

    /// Number of bins in the sleep histogram.
    pub sleep_histogram_bins: usize,

    /// Labelled description patterns for `daylog keywords`.
    pub keywords: Vec<KeywordPattern>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("diaw.txt"),
            page_size: 10,
            sleep_histogram_bins: 20,
            keywords: default_keyword_patterns(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // DAYLOG_LOG_PATH, DAYLOG_PAGE_SIZE, ...
        figment = figment.merge(Env::prefixed("DAYLOG_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for daylog.
///
/// On Linux: `~/.config/daylog`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("daylog"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_dirs_config_path_ends_with_daylog() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "daylog");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_path, PathBuf::from("diaw.txt"));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.sleep_histogram_bins, 20);
        assert_eq!(config.keywords.len(), 4);
        assert_eq!(config.keywords[1].pattern, "hw ITSC");
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
log_path = "/tmp/my-log.txt"
page_size = 5

[[keywords]]
label = "Chemistry"
pattern = "CHEM"
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.log_path, PathBuf::from("/tmp/my-log.txt"));
        assert_eq!(config.page_size, 5);
        assert_eq!(config.sleep_histogram_bins, 20);
        assert_eq!(config.keywords, [KeywordPattern::new("Chemistry", "CHEM")]);
    }
}
