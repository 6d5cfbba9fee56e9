//! CLI error types.

use trail_config::ConfigError;
use trail_menu_api::MenuApiError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("menu-api: {0}")]
    MenuApi(#[from] MenuApiError),
}
