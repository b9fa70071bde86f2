//! Layered configuration: `./spgraph.toml` over
//! `<config_dir>/spgraph/config.toml`. Both files are optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_FILE: &str = "spgraph.toml";

const DEFAULT_SAMPLES_DIR: &str = ".";
const DEFAULT_EXTENSION: &str = "txt";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub menu: MenuConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `pretty`, `text` or `json`.
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuConfig {
    #[serde(default)]
    pub samples_dir: Option<PathBuf>,
    #[serde(default)]
    pub extension: Option<String>,
}

impl Config {
    /// Field-wise overlay: values set in `over` replace ours.
    #[must_use]
    pub fn overlay(self, over: Self) -> Self {
        Self {
            output: OutputConfig {
                format: over.output.format.or(self.output.format),
            },
            menu: MenuConfig {
                samples_dir: over.menu.samples_dir.or(self.menu.samples_dir),
                extension: over.menu.extension.or(self.menu.extension),
            },
        }
    }

    pub fn output_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Sample directory for `spg menu`, relative paths resolved against
    /// `project_root`.
    pub fn samples_dir(&self, project_root: &Path) -> PathBuf {
        let dir = self
            .menu
            .samples_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAMPLES_DIR));
        project_root.join(dir)
    }

    /// File extension listed by `spg menu`, without the leading dot.
    pub fn extension(&self) -> &str {
        self.menu
            .extension
            .as_deref()
            .map_or(DEFAULT_EXTENSION, |ext| ext.trim_start_matches('.'))
    }
}

fn load_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<Config>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_project_config(project_root: &Path) -> Result<Config> {
    load_file(&project_root.join(PROJECT_CONFIG_FILE))
}

pub fn load_user_config() -> Result<Config> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(Config::default());
    };
    load_file(&config_dir.join("spgraph/config.toml"))
}

/// User config with the project config layered on top.
pub fn load_config(project_root: &Path) -> Result<Config> {
    let user = load_user_config()?;
    let project = load_project_config(project_root)?;
    Ok(user.overlay(project))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_project_file_is_default() {
        let dir = TempDir::new().expect("tempdir");
        let config = load_project_config(dir.path()).expect("load");
        assert_eq!(config, Config::default());
        assert_eq!(config.extension(), "txt");
        assert_eq!(config.samples_dir(dir.path()), dir.path().join("."));
    }

    #[test]
    fn project_file_is_parsed() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "[output]\nformat = \"json\"\n\n[menu]\nsamples_dir = \"graphs\"\nextension = \".g\"\n",
        )
        .expect("write config");

        let config = load_project_config(dir.path()).expect("load");
        assert_eq!(config.output_format(), Some("json"));
        assert_eq!(config.extension(), "g");
        assert_eq!(config.samples_dir(dir.path()), dir.path().join("graphs"));
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join(PROJECT_CONFIG_FILE), "[output\n").expect("write");
        let err = load_project_config(dir.path()).expect_err("malformed toml");
        assert!(format!("{err:#}").contains(PROJECT_CONFIG_FILE));
    }

    #[test]
    fn overlay_prefers_set_fields() {
        let user: Config =
            toml::from_str("[output]\nformat = \"text\"\n[menu]\nextension = \"dat\"\n")
                .expect("user toml");
        let project: Config = toml::from_str("[menu]\nextension = \"txt\"\n").expect("toml");

        let merged = user.overlay(project);
        assert_eq!(merged.output_format(), Some("text"));
        assert_eq!(merged.extension(), "txt");
    }
}
