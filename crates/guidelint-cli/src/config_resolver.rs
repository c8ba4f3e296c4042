//! Configuration file lookup.
//!
//! The first match wins:
//!
//! 1. `--config` flag (or `$GUIDELINT_CONFIG`)
//! 2. `{project}/guidelint.toml`, then `{project}/.guidelint.toml`
//! 3. `config.toml` in the global directory (`$GUIDELINT_CONFIG_DIR` or `~/.guidelint/`)
//! 4. Built-in defaults

use anyhow::{Context, Result};
use guidelint_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No configuration file found, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["guidelint.toml", ".guidelint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    for name in PROJECT_CONFIG_NAMES {
        let candidate = project_dir.join(name);
        if candidate.exists() {
            tracing::debug!("Found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// `$GUIDELINT_CONFIG_DIR`, else `~/.guidelint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("GUIDELINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".guidelint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidelint_core::{ConfigError, OutputFormat};
    use std::fs;
    use tempfile::TempDir;

    /// A project dir and a global dir, each holding the given files.
    fn dirs(project_files: &[&str], global_files: &[&str]) -> (TempDir, TempDir) {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        for name in project_files {
            fs::write(project.path().join(name), "").unwrap();
        }
        for name in global_files {
            fs::write(global.path().join(name), "").unwrap();
        }
        (project, global)
    }

    fn lookup(project: &TempDir, global: &TempDir) -> ConfigSource {
        resolve_inner(project.path(), None, Some(global.path().to_path_buf()))
    }

    #[test]
    fn flag_wins_and_is_not_checked_for_existence() {
        let (project, global) = dirs(&["guidelint.toml"], &["config.toml"]);
        let flag = Path::new("/nonexistent/custom.toml");
        let result = resolve_inner(
            project.path(),
            Some(flag),
            Some(global.path().to_path_buf()),
        );
        assert_eq!(result, ConfigSource::Explicit(flag.to_path_buf()));
    }

    #[test]
    fn project_file_names_in_priority_order() {
        let (project, global) = dirs(&[".guidelint.toml"], &[]);
        assert_eq!(
            lookup(&project, &global),
            ConfigSource::Project(project.path().join(".guidelint.toml"))
        );

        fs::write(project.path().join("guidelint.toml"), "").unwrap();
        assert_eq!(
            lookup(&project, &global),
            ConfigSource::Project(project.path().join("guidelint.toml"))
        );
    }

    #[test]
    fn global_config_only_without_project_config() {
        let (project, global) = dirs(&[], &["config.toml"]);
        assert_eq!(
            lookup(&project, &global),
            ConfigSource::Global(global.path().join("config.toml"))
        );

        let (project, global) = dirs(&["guidelint.toml"], &["config.toml"]);
        assert!(matches!(lookup(&project, &global), ConfigSource::Project(_)));
    }

    #[test]
    fn falls_back_to_defaults() {
        let (project, global) = dirs(&[], &["unrelated.toml"]);
        assert_eq!(lookup(&project, &global), ConfigSource::Default);
        assert_eq!(resolve_inner(project.path(), None, None), ConfigSource::Default);
        assert!(ConfigSource::Default.path().is_none());
        assert_eq!(ConfigSource::Default.load().unwrap(), Config::default());
    }

    #[test]
    fn loads_toml_and_json_documents() {
        let tmp = TempDir::new().unwrap();
        let toml_path = tmp.path().join("guidelint.toml");
        fs::write(&toml_path, "format = \"json\"\n").unwrap();
        let config = ConfigSource::Project(toml_path).load().unwrap();
        assert_eq!(config.format, OutputFormat::Json);

        let json_path = tmp.path().join("lint.json");
        fs::write(&json_path, r#"{"format": "pretty"}"#).unwrap();
        let config = ConfigSource::Explicit(json_path).load().unwrap();
        assert_eq!(config.format, OutputFormat::Pretty);
    }

    #[test]
    fn missing_explicit_file_keeps_config_error_in_chain() {
        let source = ConfigSource::Explicit(PathBuf::from("/nonexistent/guidelint.toml"));
        let err = source.load().unwrap_err();
        assert!(err.to_string().starts_with("Failed to load config"));
        assert!(err
            .chain()
            .any(|c| matches!(c.downcast_ref::<ConfigError>(), Some(ConfigError::Io { .. }))));
    }
}
