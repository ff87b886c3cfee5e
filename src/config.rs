use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Environment variable that overrides `api_url`
pub const API_URL_ENV: &str = "IMGTUI_API_URL";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Origin serving uploaded files; derived from `api_url` when absent
    #[serde(default)]
    pub static_url: Option<String>,
    #[serde(default)]
    pub vim_mode: bool,
    #[serde(default = "default_image_preview")]
    pub image_preview_enabled: bool,
    #[serde(default = "default_image_protocol")]
    pub image_protocol: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_image_preview() -> bool {
    true
}

fn default_image_protocol() -> String {
    "auto".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            static_url: None,
            vim_mode: false,
            image_preview_enabled: default_image_preview(),
            image_protocol: default_image_protocol(),
        }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(text).context("Failed to parse config")?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::from_yaml(&text)
    }

    /// Apply an explicit API URL override (from the environment)
    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        self
    }

    pub fn api_base(&self) -> String {
        self.api_url.trim_end_matches('/').to_string()
    }

    pub fn static_origin(&self) -> String {
        match &self.static_url {
            Some(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            _ => derive_static_origin(&self.api_url),
        }
    }
}

/// Static files are served from the API origin without its `/api` suffix
///
/// # Examples
/// ```
/// use imgtui::config::derive_static_origin;
///
/// assert_eq!(derive_static_origin("http://localhost:5000/api"), "http://localhost:5000");
/// assert_eq!(derive_static_origin("https://img.example.com/api/"), "https://img.example.com");
/// assert_eq!(derive_static_origin("https://img.example.com"), "https://img.example.com");
/// ```
pub fn derive_static_origin(api_url: &str) -> String {
    let trimmed = api_url.trim().trim_end_matches('/');
    trimmed
        .strip_suffix("/api")
        .unwrap_or(trimmed)
        .to_string()
}

/// Resolve the config file path
///
/// Returns `Ok(None)` when no config exists in the default locations, in
/// which case built-in defaults apply. A path given on the command line
/// must exist.
pub fn find_config_path(cli_path: Option<String>) -> Result<Option<PathBuf>> {
    if let Some(path) = cli_path {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(Some(p));
        }
        anyhow::bail!("Config file not found at specified path: {}", path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("imgtui").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_yaml() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.image_preview_enabled);
        assert!(!config.vim_mode);
        assert_eq!(config.image_protocol, "auto");
    }

    #[test]
    fn test_static_origin_derived() {
        let config = Config::from_yaml("api_url: http://host:8080/api").unwrap();
        assert_eq!(config.static_origin(), "http://host:8080");
        assert_eq!(config.api_base(), "http://host:8080/api");
    }

    #[test]
    fn test_static_origin_explicit() {
        let config = Config::from_yaml(
            "api_url: http://host:8080/api\nstatic_url: https://cdn.example.com/\n",
        )
        .unwrap();
        assert_eq!(config.static_origin(), "https://cdn.example.com");
    }

    #[test]
    fn test_env_override_ignores_blank() {
        let config = Config::default().with_api_url_override(Some("  ".to_string()));
        assert_eq!(config.api_url, DEFAULT_API_URL);

        let config = Config::default().with_api_url_override(Some("http://x/api".to_string()));
        assert_eq!(config.api_url, "http://x/api");
    }

    #[test]
    fn test_missing_cli_config_is_error() {
        let result = find_config_path(Some("/definitely/not/here.yaml".to_string()));
        assert!(result.is_err());
    }
}
