//! Environment variable expansion for configuration strings.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// Bare `$VAR` syntax is left alone. An unset variable without a default is
/// reported against `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let expanded = shellexpand::env_with_context(value, |name| std::env::var(name).map(Some))
        .map_err(|lookup| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", lookup.var_name),
        })?;
    Ok(Cow::into_owned(expanded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("http://menu-api-siblings:3001", "menu_api.url").unwrap();
        assert_eq!(result, "http://menu-api-siblings:3001");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TRAIL_TEST_API_HOST", "menu-api.internal");
        }
        let result = expand_env("http://${TRAIL_TEST_API_HOST}:3001", "menu_api.url").unwrap();
        assert_eq!(result, "http://menu-api.internal:3001");
        unsafe {
            std::env::remove_var("TRAIL_TEST_API_HOST");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TRAIL_TEST_UNSET_HOME");
        }
        let result = expand_env(
            "${TRAIL_TEST_UNSET_HOME:-https://www.epfl.ch/}",
            "site.schools_home_url",
        )
        .unwrap();
        assert_eq!(result, "https://www.epfl.ch/");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TRAIL_TEST_MISSING");
        }
        let err = expand_env("${TRAIL_TEST_MISSING}", "menu_api.url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("TRAIL_TEST_MISSING"));
        assert!(err.to_string().contains("menu_api.url"));
    }
}
