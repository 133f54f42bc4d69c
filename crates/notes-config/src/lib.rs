//! Configuration management for the notes documentation browser.
//!
//! Parses `notes.toml` configuration files with serde and provides
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
//! - `server.host`
//! - `site.title`
//! - `site.tagline`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override notes source directory.
    pub source_dir: Option<PathBuf>,
    /// Override registry file.
    pub registry: Option<PathBuf>,
    /// Override static build output directory.
    pub out_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "notes.toml";

/// Registry filename inside the source directory, used unless one is configured.
const REGISTRY_FILENAME: &str = "registry.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Site presentation configuration.
    pub site: SiteConfig,
    /// Static build configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved static build output directory (set after loading).
    #[serde(skip)]
    pub out_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    registry: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory holding one `{slug}.md` file per note.
    pub source_dir: PathBuf,
    /// Registry file describing groups and items.
    pub registry: PathBuf,
}

/// Site presentation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title shown in the sidebar header and landing hero.
    pub title: String,
    /// Short line shown under the title.
    pub tagline: String,
    /// Landing page hero heading. Falls back to `title`.
    pub heading: Option<String>,
    /// Landing page hero text.
    pub description: String,
    /// Footer credit line on the landing page.
    pub footer: String,
    /// Number of entries shown as "Popular Topics" on the landing page.
    pub popular_count: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Notes".to_owned(),
            tagline: String::new(),
            heading: None,
            description: String::new(),
            footer: String::new(),
            popular_count: 6,
        }
    }
}

/// Raw build configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    out_dir: Option<String>,
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
        /// Config field path (e.g., "`site.title`").
        field: String,
        /// Error message (e.g., "${`NOTES_TITLE`} not set").
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

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `notes.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
            if self.docs.registry.is_none() {
                self.docs_resolved.registry = source_dir.join(REGISTRY_FILENAME);
            }
        }
        if let Some(registry) = &settings.registry {
            self.docs_resolved.registry.clone_from(registry);
        }
        if let Some(out_dir) = &settings.out_dir {
            self.out_dir.clone_from(out_dir);
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
            server: ServerConfig::default(),
            docs: DocsConfigRaw::default(),
            site: SiteConfig::default(),
            build: BuildConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("notes"),
                registry: base.join("notes").join(REGISTRY_FILENAME),
            },
            out_dir: base.join("dist"),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        require_non_empty(&self.site.title, "site.title")?;

        if self.site.popular_count == 0 {
            return Err(ConfigError::Validation(
                "site.popular_count must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;
        self.site.tagline = expand::expand_env(&self.site.tagline, "site.tagline")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    ///
    /// The registry defaults to `registry.toml` inside the source directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source_dir = config_dir.join(self.docs.source_dir.as_deref().unwrap_or("notes"));
        let registry = match self.docs.registry.as_deref() {
            Some(registry) => config_dir.join(registry),
            None => source_dir.join(REGISTRY_FILENAME),
        };

        self.docs_resolved = DocsConfig {
            source_dir,
            registry,
        };
        self.out_dir = config_dir.join(self.build.out_dir.as_deref().unwrap_or("dist"));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7979);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/notes"));
        assert_eq!(
            config.docs_resolved.registry,
            PathBuf::from("/test/notes/registry.toml")
        );
        assert_eq!(config.out_dir, PathBuf::from("/test/dist"));
        assert_eq!(config.site.popular_count, 6);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7979);
        assert_eq!(config.site.title, "Notes");
    }

    #[test]
    fn test_parse_server_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_parse_site_config() {
        let toml = r#"
[site]
title = "Next.js Notes"
tagline = "by Abhay"
heading = "Next.js 15 Docs"
footer = "Crafted with love by Abhay"
popular_count = 3
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "Next.js Notes");
        assert_eq!(config.site.tagline, "by Abhay");
        assert_eq!(config.site.heading.as_deref(), Some("Next.js 15 Docs"));
        assert_eq!(config.site.description, "");
        assert_eq!(config.site.footer, "Crafted with love by Abhay");
        assert_eq!(config.site.popular_count, 3);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "content/notes"
registry = "content/groups.toml"

[build]
out_dir = "public"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/content/notes")
        );
        assert_eq!(
            config.docs_resolved.registry,
            PathBuf::from("/project/content/groups.toml")
        );
        assert_eq!(config.out_dir, PathBuf::from("/project/public"));
    }

    #[test]
    fn test_registry_defaults_into_source_dir() {
        let toml = r#"
[docs]
source_dir = "pages"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.registry,
            PathBuf::from("/project/pages/registry.toml")
        );
    }

    #[test]
    fn test_apply_cli_settings_host() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 7979); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_paths() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/notes")),
            registry: Some(PathBuf::from("/custom/registry.toml")),
            out_dir: Some(PathBuf::from("/custom/out")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/notes")
        );
        assert_eq!(
            config.docs_resolved.registry,
            PathBuf::from("/custom/registry.toml")
        );
        assert_eq!(config.out_dir, PathBuf::from("/custom/out"));
    }

    #[test]
    fn test_cli_source_dir_moves_default_registry() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/other/notes")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.registry,
            PathBuf::from("/other/notes/registry.toml")
        );
    }

    #[test]
    fn test_cli_source_dir_keeps_configured_registry() {
        let toml = r#"
[docs]
registry = "groups.toml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/other/notes")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/other/notes")
        );
        assert_eq!(
            config.docs_resolved.registry,
            PathBuf::from("/project/groups.toml")
        );
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.title = String::new();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.title"));
    }

    #[test]
    fn test_validate_rejects_zero_popular_count() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.popular_count = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("popular_count"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/notes.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("notes.toml");
        std::fs::write(
            &config_path,
            r#"
[docs]
source_dir = "docs"

[site]
title = "Next.js Notes"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(config.docs_resolved.source_dir, temp_dir.path().join("docs"));
        assert_eq!(
            config.docs_resolved.registry,
            temp_dir.path().join("docs").join("registry.toml")
        );
        assert_eq!(config.out_dir, temp_dir.path().join("dist"));
        assert_eq!(config.config_path, Some(config_path));
    }

    #[test]
    fn test_load_applies_cli_settings_last() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("notes.toml");
        std::fs::write(&config_path, "[server]\nport = 8000\n").unwrap();

        let settings = CliSettings {
            port: Some(9100),
            ..Default::default()
        };
        let config = Config::load(Some(&config_path), Some(&settings)).unwrap();

        assert_eq!(config.server.port, 9100);
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("notes.toml");
        std::fs::write(&config_path, "[server\nport = ").unwrap();

        let result = Config::load(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
