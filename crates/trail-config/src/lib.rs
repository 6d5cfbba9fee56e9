//! Configuration management for Trail.
//!
//! Parses `trail.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `menu_api.url`
//! - `site.schools_home_url`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override menu-api base URL.
    pub api_url: Option<String>,
    /// Override menu-api timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Override cache enabled flag.
    pub cache_enabled: Option<bool>,
    /// Override local menu fallback flag.
    pub menu_fallback: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "trail.toml";

/// One hour, the short cache lifetime.
const DEFAULT_SHORT_TTL_SECS: u64 = 60 * 60;

/// One week, the long (stale fallback) cache lifetime.
const DEFAULT_LONG_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote menu-api service configuration.
    pub menu_api: MenuApiConfig,
    /// Site-wide settings that used to live in theme globals.
    pub site: SiteConfig,
    /// Breadcrumb assembly options.
    pub breadcrumb: BreadcrumbConfig,
    /// Cache configuration (paths are relative strings from TOML).
    cache: CacheConfigRaw,

    /// Resolved cache configuration (set after loading).
    #[serde(skip)]
    pub cache_resolved: CacheConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Remote menu-api service configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MenuApiConfig {
    /// Base URL of the service (without the `/menus/...` suffix).
    pub url: String,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for MenuApiConfig {
    fn default() -> Self {
        Self {
            url: "http://menu-api-siblings:3001".to_owned(),
            timeout_secs: 5,
        }
    }
}

/// Site-wide settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Canonical home URL shared by all schools, used by the home icon.
    pub schools_home_url: String,
    /// Theme (stylesheet) name whose home icon points to the site itself.
    pub light_theme: String,
    /// Page template that hides the breadcrumb entirely.
    pub homepage_template: String,
    /// Menu location rendered by the top navigation.
    pub menu_location: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            schools_home_url: "https://www.epfl.ch/".to_owned(),
            light_theme: "wp-theme-light".to_owned(),
            homepage_template: "page-homepage.php".to_owned(),
            menu_location: "top".to_owned(),
        }
    }
}

/// Breadcrumb assembly options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BreadcrumbConfig {
    /// Walk the local menu when the remote service returns no ancestors.
    pub menu_fallback: bool,
}

/// Raw cache configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CacheConfigRaw {
    enabled: Option<bool>,
    dir: Option<String>,
    short_ttl_secs: Option<u64>,
    long_ttl_secs: Option<u64>,
}

/// Resolved cache configuration with an absolute directory.
#[derive(Debug)]
pub struct CacheConfig {
    /// Whether menu-api responses are cached.
    pub enabled: bool,
    /// Cache directory.
    pub dir: PathBuf,
    /// Lifetime of fresh entries, in seconds.
    pub short_ttl_secs: u64,
    /// Lifetime of stale fallback entries, in seconds.
    pub long_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: PathBuf::from(".trail/cache"),
            short_ttl_secs: DEFAULT_SHORT_TTL_SECS,
            long_ttl_secs: DEFAULT_LONG_TTL_SECS,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`menu_api.url`").
        field: String,
        /// Error message (e.g., "${`MENU_API_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `trail.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, so CLI
    /// arguments take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(api_url) = &settings.api_url {
            self.menu_api.url.clone_from(api_url);
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.menu_api.timeout_secs = timeout_secs;
        }
        if let Some(cache_enabled) = settings.cache_enabled {
            self.cache_resolved.enabled = cache_enabled;
        }
        if let Some(menu_fallback) = settings.menu_fallback {
            self.breadcrumb.menu_fallback = menu_fallback;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            menu_api: MenuApiConfig::default(),
            site: SiteConfig::default(),
            breadcrumb: BreadcrumbConfig::default(),
            cache: CacheConfigRaw::default(),
            cache_resolved: CacheConfig {
                dir: base.join(".trail").join("cache"),
                ..CacheConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_menu_api()?;
        self.validate_site()?;
        self.validate_cache()?;
        Ok(())
    }

    fn validate_menu_api(&self) -> Result<(), ConfigError> {
        const MAX_TIMEOUT_SECS: u64 = 60;

        require_non_empty(&self.menu_api.url, "menu_api.url")?;
        require_http_url(&self.menu_api.url, "menu_api.url")?;

        // The breadcrumb renders inline with the page, a stalled service must not hold it
        if self.menu_api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "menu_api.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if self.menu_api.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "menu_api.timeout_secs cannot exceed {MAX_TIMEOUT_SECS}"
            )));
        }
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.schools_home_url, "site.schools_home_url")?;
        require_http_url(&self.site.schools_home_url, "site.schools_home_url")?;
        require_non_empty(&self.site.homepage_template, "site.homepage_template")?;
        Ok(())
    }

    fn validate_cache(&self) -> Result<(), ConfigError> {
        let cache = &self.cache_resolved;
        if cache.short_ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "cache.short_ttl_secs must be greater than 0".to_owned(),
            ));
        }
        if cache.long_ttl_secs < cache.short_ttl_secs {
            return Err(ConfigError::Validation(
                "cache.long_ttl_secs cannot be shorter than cache.short_ttl_secs".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.menu_api.url = expand::expand_env(&self.menu_api.url, "menu_api.url")?;
        self.site.schools_home_url =
            expand::expand_env(&self.site.schools_home_url, "site.schools_home_url")?;
        Ok(())
    }

    /// Resolve the cache directory and TTLs against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults = CacheConfig::default();
        self.cache_resolved = CacheConfig {
            enabled: self.cache.enabled.unwrap_or(defaults.enabled),
            dir: self.cache.dir.as_deref().map_or_else(
                || config_dir.join(".trail").join("cache"),
                |dir| config_dir.join(dir),
            ),
            short_ttl_secs: self.cache.short_ttl_secs.unwrap_or(defaults.short_ttl_secs),
            long_ttl_secs: self.cache.long_ttl_secs.unwrap_or(defaults.long_ttl_secs),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/site"));
        assert_eq!(config.menu_api.url, "http://menu-api-siblings:3001");
        assert_eq!(config.menu_api.timeout_secs, 5);
        assert_eq!(config.site.light_theme, "wp-theme-light");
        assert_eq!(config.site.homepage_template, "page-homepage.php");
        assert!(!config.breadcrumb.menu_fallback);
        assert!(!config.cache_resolved.enabled);
        assert_eq!(
            config.cache_resolved.dir,
            PathBuf::from("/site/.trail/cache")
        );
        assert_eq!(config.cache_resolved.short_ttl_secs, 3600);
        assert_eq!(config.cache_resolved.long_ttl_secs, 604_800);
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.menu_api.url, "http://menu-api-siblings:3001");
        assert_eq!(config.site.schools_home_url, "https://www.epfl.ch/");
    }

    #[test]
    fn test_parse_menu_api_config() {
        let toml = r#"
[menu_api]
url = "http://localhost:3001"
timeout_secs = 2
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.menu_api.url, "http://localhost:3001");
        assert_eq!(config.menu_api.timeout_secs, 2);
    }

    #[test]
    fn test_resolve_cache_paths() {
        let toml = r#"
[cache]
enabled = true
dir = "var/menu-cache"
short_ttl_secs = 60
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert!(config.cache_resolved.enabled);
        assert_eq!(
            config.cache_resolved.dir,
            PathBuf::from("/project/var/menu-cache")
        );
        assert_eq!(config.cache_resolved.short_ttl_secs, 60);
        assert_eq!(config.cache_resolved.long_ttl_secs, 604_800);
    }

    #[test]
    fn test_validate_rejects_non_http_api_url() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.menu_api.url = "menu-api:3001".to_owned();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("menu_api.url"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.menu_api.timeout_secs = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_validate_rejects_long_ttl_shorter_than_short() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.cache_resolved.short_ttl_secs = 600;
        config.cache_resolved.long_ttl_secs = 60;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("long_ttl_secs"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/site"));
        let overrides = CliSettings {
            api_url: Some("http://127.0.0.1:3001".to_owned()),
            cache_enabled: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.menu_api.url, "http://127.0.0.1:3001");
        assert_eq!(config.menu_api.timeout_secs, 5); // Unchanged
        assert!(config.cache_resolved.enabled);
        assert!(!config.breadcrumb.menu_fallback); // Unchanged
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[site]
light_theme = "theme-light"

[breadcrumb]
menu_fallback = true

[cache]
enabled = true
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site.light_theme, "theme-light");
        assert!(config.breadcrumb.menu_fallback);
        assert!(config.cache_resolved.enabled);
        assert_eq!(config.cache_resolved.dir, tmp.path().join(".trail/cache"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/trail.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_rejects_invalid_cli_override() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let overrides = CliSettings {
            timeout_secs: Some(0),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
