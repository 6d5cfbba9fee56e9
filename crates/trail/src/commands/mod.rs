//! CLI command implementations.

pub(crate) mod fetch;
pub(crate) mod nav;
pub(crate) mod render;

pub(crate) use fetch::FetchArgs;
pub(crate) use nav::NavArgs;
pub(crate) use render::RenderArgs;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use trail_breadcrumb::PageContext;
use trail_cache::FileCache;
use trail_config::{CliSettings, Config};
use trail_menu_api::{CachedCrumbSource, CrumbSource, MenuApiClient};

use crate::error::CliError;

/// Options shared by the commands that talk to menu-api.
#[derive(Args)]
pub(crate) struct ServiceArgs {
    /// Path to configuration file (default: auto-discover trail.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Menu-api base URL (overrides config).
    #[arg(long, env = "TRAIL_MENU_API_URL")]
    api_url: Option<String>,

    /// Per-call timeout in seconds (overrides config).
    #[arg(long)]
    timeout: Option<u64>,

    /// Disable caching.
    #[arg(long)]
    no_cache: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ServiceArgs {
    fn settings(&self) -> CliSettings {
        CliSettings {
            api_url: self.api_url.clone(),
            timeout_secs: self.timeout,
            cache_enabled: self.no_cache.then_some(false),
            ..CliSettings::default()
        }
    }

    /// Load configuration with `extra` applied on top of these options.
    fn load_config(&self, extra: impl FnOnce(&mut CliSettings)) -> Result<Config, CliError> {
        let mut settings = self.settings();
        extra(&mut settings);
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}

/// Build the menu-api source described by `config`.
fn crumb_source(config: &Config, version: &str) -> Box<dyn CrumbSource> {
    let client = MenuApiClient::new(
        &config.menu_api.url,
        Duration::from_secs(config.menu_api.timeout_secs),
    );

    let cache = &config.cache_resolved;
    if !cache.enabled {
        return Box::new(client);
    }

    tracing::info!(dir = %cache.dir.display(), "menu-api cache enabled");
    let store = FileCache::new(cache.dir.clone(), version);
    Box::new(CachedCrumbSource::new(
        client,
        &store,
        Duration::from_secs(cache.short_ttl_secs),
        Duration::from_secs(cache.long_ttl_secs),
    ))
}

/// Read a page snapshot.
fn read_context(path: &Path) -> Result<PageContext, CliError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn service_args() -> ServiceArgs {
        ServiceArgs {
            config: None,
            api_url: Some("http://localhost:3001".to_owned()),
            timeout: Some(2),
            no_cache: true,
            verbose: false,
        }
    }

    #[test]
    fn test_settings_from_args() {
        let settings = service_args().settings();

        assert_eq!(settings.api_url.as_deref(), Some("http://localhost:3001"));
        assert_eq!(settings.timeout_secs, Some(2));
        assert_eq!(settings.cache_enabled, Some(false));
        assert_eq!(settings.menu_fallback, None);
    }

    #[test]
    fn test_settings_without_no_cache_keep_config_value() {
        let args = ServiceArgs {
            no_cache: false,
            ..service_args()
        };

        assert_eq!(args.settings().cache_enabled, None);
    }

    #[test]
    fn test_load_config_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trail.toml");
        std::fs::write(&path, "[breadcrumb]\nmenu_fallback = false\n").unwrap();
        let args = ServiceArgs {
            config: Some(path),
            ..service_args()
        };

        let config = args
            .load_config(|settings| settings.menu_fallback = Some(true))
            .unwrap();

        assert_eq!(config.menu_api.url, "http://localhost:3001");
        assert_eq!(config.menu_api.timeout_secs, 2);
        assert!(config.breadcrumb.menu_fallback);
        assert!(!config.cache_resolved.enabled);
    }

    #[test]
    fn test_read_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        std::fs::write(
            &path,
            r#"{"language": "en", "site_url": "https://www.epfl.ch/schools/ic/",
                "menu_items": [{"db_id": 1, "title": "About", "url": "/about/"}]}"#,
        )
        .unwrap();

        let ctx = read_context(&path).unwrap();

        assert_eq!(ctx.language, "en");
        assert_eq!(ctx.menu_items.len(), 1);
    }

    #[test]
    fn test_read_context_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(read_context(&path), Err(CliError::Json(_))));
    }
}
