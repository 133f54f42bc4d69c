//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use std::cell::RefCell;

use crate::ConfigError;

/// Expand `${VAR}` references in the config value `field`.
///
/// Values without `${` are returned unchanged, so a literal `$` in a
/// tagline never needs escaping.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let unset = RefCell::new(Vec::new());
    let expanded = shellexpand::env_with_context_no_errors(value, |var: &str| {
        if let Ok(val) = std::env::var(var) {
            Some(val)
        } else {
            unset.borrow_mut().push(var.to_owned());
            None
        }
    })
    .into_owned();

    // Unset variables with a `:-default` are already substituted; the ones
    // still present verbatim had no fallback.
    if let Some(var) = unset
        .into_inner()
        .into_iter()
        .find(|var| expanded.contains(&format!("${{{var}}}")))
    {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var}}} not set"),
        });
    }

    Ok(expanded)
}
