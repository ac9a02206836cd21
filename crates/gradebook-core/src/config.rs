//! Gradebook configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::registry::EnrollmentPolicy;
use crate::report::DEFAULT_GRADE_PRECISION;

/// Default short-date format, e.g. `5/21/2000`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Top-level gradebook configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradebookConfig {
    /// chrono format string used for dates in status lines.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Decimals shown for average grades on report cards.
    #[serde(default = "default_grade_precision")]
    pub grade_precision: usize,
    /// Reject enrollments in course ids that were never added.
    #[serde(default)]
    pub require_registered_course: bool,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}
fn default_grade_precision() -> usize {
    DEFAULT_GRADE_PRECISION
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            grade_precision: default_grade_precision(),
            require_registered_course: false,
        }
    }
}

impl GradebookConfig {
    /// The enrollment policy this configuration selects.
    pub fn enrollment_policy(&self) -> EnrollmentPolicy {
        if self.require_registered_course {
            EnrollmentPolicy::RequireCourse
        } else {
            EnrollmentPolicy::Permissive
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradebook.toml` in the current directory
/// 2. `~/.config/gradebook/config.toml`
///
/// Environment variable override: `GRADEBOOK_DATE_FORMAT`.
pub fn load_config() -> Result<GradebookConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradebookConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradebook.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradebookConfig::default(),
    };

    if let Ok(format) = std::env::var("GRADEBOOK_DATE_FORMAT") {
        if !format.is_empty() {
            validate_date_format(&format)
                .context("invalid GRADEBOOK_DATE_FORMAT environment variable")?;
            config.date_format = format;
        }
    }

    Ok(config)
}

/// Parse a TOML string into a config.
pub fn parse_config_str(content: &str) -> Result<GradebookConfig> {
    let config: GradebookConfig = toml::from_str(content)?;
    validate_date_format(&config.date_format)?;
    Ok(config)
}

/// Reject chrono format strings that would fail when a date is rendered.
pub fn validate_date_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        anyhow::bail!("invalid date format: {format:?}");
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebook"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GradebookConfig::default();
        assert_eq!(config.date_format, "%-m/%-d/%Y");
        assert_eq!(config.grade_precision, 2);
        assert!(!config.require_registered_course);
        assert_eq!(config.enrollment_policy(), EnrollmentPolicy::Permissive);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse_config_str("grade_precision = 1\n").unwrap();
        assert_eq!(config.grade_precision, 1);
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn strict_enrollment_from_toml() {
        let config = parse_config_str(
            r#"
date_format = "%Y-%m-%d"
require_registered_course = true
"#,
        )
        .unwrap();
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.enrollment_policy(), EnrollmentPolicy::RequireCourse);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/no/such/gradebook.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradebook.toml");
        std::fs::write(&path, "grade_precision = 3\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.grade_precision, 3);
    }

    #[test]
    fn unknown_date_specifier_is_rejected() {
        let err = parse_config_str("date_format = \"%Q\"\n").unwrap_err();
        assert!(err.to_string().contains("invalid date format"));
        assert!(validate_date_format("%Y-%m-%d").is_ok());
        assert!(validate_date_format(DEFAULT_DATE_FORMAT).is_ok());
        assert!(validate_date_format("%").is_err());
    }

    #[test]
    fn invalid_date_format_in_file_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradebook.toml");
        std::fs::write(&path, "date_format = \"%Q\"\n").unwrap();
        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("invalid date format"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(parse_config_str("grade_precision = \"two\"").is_err());
    }
}
