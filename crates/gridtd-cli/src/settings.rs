//! Settings loading for the gridtd CLI

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};

use gridtd_rl::AgentConfig;

pub const CONFIG_FILE_NAME: &str = "gridtd.toml";
pub const CONFIG_ENV_VAR: &str = "GRIDTD_CONFIG";

/// Settings for the CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub agent: AgentConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Plain-text copy of the log, truncated on each run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<PathBuf>,
    /// Draw the board and value table after every step
    pub render_steps: bool,
    /// Print the final report as JSON instead of tables
    pub json: bool,
    /// Step cap for the greedy route printed after training
    pub rollout_steps: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            transcript: None,
            render_steps: true,
            json: false,
            rollout_steps: 20,
        }
    }
}

impl Settings {
    /// Load settings from the first config file found and the environment.
    /// An explicitly named file must exist.
    ///
    /// Returns the settings and the file they were read from, if any.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let (path, required) = match explicit {
            Some(path) => (Some(path.to_path_buf()), true),
            None => (Self::find_config_file(), false),
        };
        let settings = Self::load_from(path.as_deref(), required)
            .with_context(|| match &path {
                Some(path) => format!("Failed to load config from {}", path.display()),
                None => "Failed to load config".to_string(),
            })?;
        Ok((settings, path))
    }

    /// Load from a specific file (if any) layered under `GRIDTD__*` variables
    pub fn load_from(path: Option<&Path>, required: bool) -> Result<Self> {
        let mut builder = ConfigBuilder::<config::builder::DefaultState>::default();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path.to_path_buf()).required(required));
        }

        // GRIDTD__AGENT__ROUNDS=50 -> agent.rounds
        builder = builder.add_source(
            Environment::with_prefix("GRIDTD")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Check in order: GRIDTD_CONFIG, ./gridtd.toml, <config dir>/gridtd/gridtd.toml
    fn find_config_file() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }

        dirs::config_dir()
            .map(|dir| dir.join("gridtd").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.agent, AgentConfig::default());
        assert!(settings.output.render_steps);
        assert!(!settings.output.json);
        assert!(settings.output.transcript.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[agent]
rounds = 50
exploration_rate = 0.1
seed = 7

[output]
render_steps = false
transcript = "result.log"
"#
        )
        .unwrap();

        let settings = Settings::load_from(Some(file.path()), true).unwrap();
        assert_eq!(settings.agent.rounds, 50);
        assert_eq!(settings.agent.exploration_rate, 0.1);
        assert_eq!(settings.agent.seed, Some(7));
        assert_eq!(settings.agent.learning_rate, 0.2);
        assert!(!settings.output.render_steps);
        assert_eq!(settings.output.transcript, Some(PathBuf::from("result.log")));
    }

    #[test]
    fn test_missing_optional_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(Some(&dir.path().join("absent.toml")), false).unwrap();
        assert_eq!(settings.agent.rounds, AgentConfig::default().rounds);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = Settings::load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("absent.toml"));
    }

    #[test]
    fn test_explicit_file_reported_as_source() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[agent]\nrounds = 3").unwrap();

        let (settings, source) = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.agent.rounds, 3);
        assert_eq!(source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_toml_round_trip() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        assert!(text.contains("[agent]"));
        assert!(text.contains("learning_rate = 0.2"));

        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
