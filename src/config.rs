use crate::constants::*;
use crate::errors::{AppError, AppResult};
use crate::handoff::{Handoff, HandoffStore};
use crate::models::HandoffMode;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Resolved configuration with all values filled in.
///
/// Every field has a default, so a TOML file only needs the keys it changes. Unknown
/// keys are rejected to catch typos.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Base URL of the administrative generation service
    pub admin_base_url: String,
    /// Base URL of the technical question/generation service
    pub technical_base_url: String,
    /// JSON file the editor reads generated documents from
    pub storage_path: PathBuf,
    /// Page the user is sent to after a redirect handoff
    pub editor_target: String,
    /// `"redirect"` (store for the editor) or `"inline"` (print the document)
    pub handoff: String,
    /// Per-request timeout in seconds. Unset means requests wait indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            admin_base_url: ADMIN_BASE_URL.to_string(),
            technical_base_url: TECHNICAL_BASE_URL.to_string(),
            storage_path: PathBuf::from(STORAGE_PATH),
            editor_target: EDITOR_TARGET.to_string(),
            handoff: "redirect".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ResolvedConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the TOML is malformed or has unknown keys, `UrlError`
    /// if a base URL does not parse, and `InvalidInput` for an unknown handoff mode or a
    /// zero timeout.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ResolvedConfig = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        for base in [&self.admin_base_url, &self.technical_base_url] {
            let url = Url::parse(base)?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(AppError::UrlError(format!(
                    "Base URL must be http or https, got: {base}"
                )));
            }
        }

        let mode = self.handoff.trim().to_lowercase();
        if !REDIRECT_ALIASES.contains(&mode.as_str()) && !INLINE_ALIASES.contains(&mode.as_str())
        {
            return Err(AppError::InvalidInput(format!(
                "Unknown handoff mode '{}', expected one of: {}",
                self.handoff,
                [REDIRECT_ALIASES, INLINE_ALIASES].concat().join(", ")
            )));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(AppError::InvalidInput(
                "Request timeout must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    pub fn handoff_mode(&self) -> HandoffMode {
        HandoffMode::from(self.handoff.as_str())
    }

    /// Handoff configured from this file, optionally forcing a mode.
    pub fn handoff(&self, mode: Option<HandoffMode>) -> Handoff {
        Handoff::new(
            mode.unwrap_or_else(|| self.handoff_mode()),
            HandoffStore::new(&self.storage_path),
            self.editor_target.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_values() {
        let config = ResolvedConfig::default();
        assert_eq!(config.admin_base_url, "http://127.0.0.1:8000");
        assert_eq!(config.technical_base_url, "http://127.0.0.1:8001");
        assert_eq!(config.editor_target, "editor.html");
        assert_eq!(config.handoff_mode(), HandoffMode::Redirect);
        assert!(config.request_timeout_secs.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            technical_base_url = "https://pliegos.example.org/tec"
            handoff = "inline"
            "#,
        )
        .unwrap();

        let config = ResolvedConfig::from_toml_file(tmp.path()).unwrap();
        assert_eq!(config.technical_base_url, "https://pliegos.example.org/tec");
        assert_eq!(config.admin_base_url, "http://127.0.0.1:8000");
        assert_eq!(config.handoff_mode(), HandoffMode::Inline);
    }

    #[test]
    fn unknown_key_errors() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "extra_flag = true").unwrap();
        assert!(ResolvedConfig::from_toml_file(tmp.path()).is_err());
    }

    #[test]
    fn bad_url_errors() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, r#"admin_base_url = "not a url""#).unwrap();
        let err = ResolvedConfig::from_toml_file(tmp.path()).unwrap_err();
        assert!(matches!(err, AppError::UrlError(_)));
    }

    #[test]
    fn unknown_handoff_mode_errors() {
        let config = ResolvedConfig {
            handoff: "popup".into(),
            ..ResolvedConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_errors() {
        let config = ResolvedConfig {
            request_timeout_secs: Some(0),
            ..ResolvedConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
