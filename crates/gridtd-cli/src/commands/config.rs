//! Configuration management commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::settings::{Settings, CONFIG_FILE_NAME};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Where to write the file
        #[arg(long, default_value = CONFIG_FILE_NAME)]
        path: PathBuf,
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

pub fn run(cmd: ConfigCommands, settings: &Settings, source: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(settings, source),
        ConfigCommands::Init { path, force } => {
            if init(&path, force)? {
                println!("Wrote default configuration to {}", path.display());
            } else {
                println!("Configuration file already exists: {}", path.display());
                println!("Use --force to overwrite");
            }
            Ok(())
        }
    }
}

fn show(settings: &Settings, source: Option<&Path>) -> Result<()> {
    match source {
        Some(path) => println!("# Config file: {}", path.display()),
        None => println!("# No configuration file found, using defaults"),
    }
    print!("{}", settings.to_toml()?);
    Ok(())
}

/// Write the default settings to `path`. Returns false when the file exists
/// and `force` is not set.
pub fn init(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }

    let contents = Settings::default().to_toml()?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        assert!(init(&path, false).unwrap());
        let settings = Settings::load_from(Some(&path), true).unwrap();
        assert_eq!(settings.agent.rounds, 10);
        assert_eq!(settings.agent.learning_rate, 0.2);
    }

    #[test]
    fn test_init_does_not_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[agent]\nrounds = 99\n").unwrap();

        assert!(!init(&path, false).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[agent]\nrounds = 99\n");

        assert!(init(&path, true).unwrap());
        let settings = Settings::load_from(Some(&path), true).unwrap();
        assert_eq!(settings.agent.rounds, 10);
    }
}
