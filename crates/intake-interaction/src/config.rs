//! Configuration file management for Intake.
//!
//! Settings are layered, lowest precedence first:
//! built-in defaults, `~/.config/intake/config.toml`, then environment
//! variables. Command-line flags are applied by the binary on top.

use intake_core::{ClientConfig, IntakeError, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides `ClientConfig::api_url`.
pub const ENV_API_URL: &str = "INTAKE_API_URL";
/// Overrides `ClientConfig::request_timeout_secs`.
pub const ENV_TIMEOUT_SECS: &str = "INTAKE_TIMEOUT_SECS";
/// Overrides `ClientConfig::conversation_prefix`.
pub const ENV_CONVERSATION_PREFIX: &str = "INTAKE_CONVERSATION_PREFIX";

/// Returns the path to the configuration file: ~/.config/intake/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("intake").join("config.toml"))
}

/// Reads a TOML config file.
///
/// Returns `Ok(None)` when the file does not exist or is blank.
pub fn load_config_file(path: &Path) -> Result<Option<ClientConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        IntakeError::config(format!("Failed to read config file at {}: {}", path.display(), e))
    })?;

    if content.trim().is_empty() {
        return Ok(None);
    }

    toml::from_str(&content).map(Some).map_err(|e| {
        IntakeError::config(format!("Failed to parse config file at {}: {}", path.display(), e))
    })
}

/// Applies environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL) {
        config.api_url = url;
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        config.request_timeout_secs = raw.trim().parse().map_err(|_| {
            IntakeError::config(format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds (got {raw:?})"))
        })?;
    }

    if let Some(prefix) = lookup(ENV_CONVERSATION_PREFIX) {
        config.conversation_prefix = prefix;
    }

    Ok(config)
}

/// Command-line values layered on top of file and environment settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    /// Applies the set values to `config`.
    pub fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(timeout) = self.request_timeout_secs {
            config.request_timeout_secs = timeout;
        }
        config
    }
}

/// Reads the configuration file and applies environment overrides.
///
/// The result is not validated yet; higher-precedence layers may still
/// replace invalid values. An explicitly given `path` must exist; the
/// default path is optional.
pub fn load_layered_config(path: Option<&Path>) -> Result<ClientConfig> {
    let from_file = match path {
        Some(explicit) => {
            if !explicit.exists() {
                return Err(IntakeError::config(format!(
                    "Configuration file not found at: {}",
                    explicit.display()
                )));
            }
            load_config_file(explicit)?
        }
        None => match default_config_path() {
            Some(default_path) => load_config_file(&default_path)?,
            None => None,
        },
    };

    if from_file.is_some() {
        tracing::debug!("[Config] Loaded configuration file");
    }

    apply_env_overrides(from_file.unwrap_or_default(), |key| env::var(key).ok())
}

/// Applies command-line overrides to the layered config, then validates once.
pub fn finalize_config(layered: ClientConfig, overrides: &ConfigOverrides) -> Result<ClientConfig> {
    overrides.apply(layered).validated()
}

/// Loads the client configuration from file, environment and command line.
pub fn load_client_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<ClientConfig> {
    finalize_config(load_layered_config(path)?, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        assert_eq!(load_config_file(&path).expect("Should tolerate missing file"), None);
    }

    #[test]
    fn test_blank_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "\n   \n").unwrap();

        assert_eq!(load_config_file(&path).expect("Should tolerate blank file"), None);
    }

    #[test]
    fn test_file_values_are_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "api_url = \"https://nurse.example.com/\"\nrequest_timeout_secs = 12\n",
        )
        .unwrap();

        let config = load_client_config(Some(&path), &ConfigOverrides::default())
            .expect("Should load config");

        assert_eq!(config.api_url, "https://nurse.example.com");
        assert_eq!(config.request_timeout_secs, 12);
        assert_eq!(config.conversation_prefix, "default");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "api_url = [").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.toml");

        assert!(load_layered_config(Some(&path)).unwrap_err().is_config());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let base = ClientConfig {
            api_url: "http://file.example.com".to_string(),
            ..ClientConfig::default()
        };

        let config = apply_env_overrides(
            base,
            lookup_from(&[
                (ENV_API_URL, "http://env.example.com"),
                (ENV_TIMEOUT_SECS, " 5 "),
                (ENV_CONVERSATION_PREFIX, "clinic"),
            ]),
        )
        .expect("Should apply overrides");

        assert_eq!(config.api_url, "http://env.example.com");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.conversation_prefix, "clinic");
    }

    #[test]
    fn test_env_timeout_must_be_numeric() {
        let err = apply_env_overrides(
            ClientConfig::default(),
            lookup_from(&[(ENV_TIMEOUT_SECS, "soon")]),
        )
        .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_command_line_overrides_invalid_env_value() {
        let layered = apply_env_overrides(
            ClientConfig::default(),
            lookup_from(&[(ENV_API_URL, "localhost:5000")]),
        )
        .expect("Should apply overrides");
        assert!(layered.clone().validated().unwrap_err().is_config());

        let overrides = ConfigOverrides {
            api_url: Some("http://localhost:5000/".to_string()),
            request_timeout_secs: Some(10),
        };
        let config = finalize_config(layered, &overrides).expect("Override should win");

        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_invalid_value_without_override_is_rejected() {
        let layered = ClientConfig {
            request_timeout_secs: 0,
            ..ClientConfig::default()
        };

        let err = finalize_config(layered, &ConfigOverrides::default()).unwrap_err();
        assert!(err.is_config());
    }
}
