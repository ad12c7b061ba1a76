//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list`, and `config path`
//! for viewing and modifying settings from the command line.

use std::path::Path;

use clap::Subcommand;
use flightarc::config::{ConfigFile, ConfigKey};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., playback.speed)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., playback.speed)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand against the file at `path`.
pub fn run(path: &Path, command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => {
            println!("{}", get_value(path, &key)?);
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            let config_key = set_value(path, &key, &value)?;
            println!("Set {} = {}", config_key.name(), value.trim());
            Ok(())
        }
        ConfigCommands::List => {
            print!("{}", render_list(&ConfigFile::load_from(path)?));
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'flightarc config list' to see available keys.",
            key
        ))
    })
}

fn get_value(path: &Path, key: &str) -> Result<String, CliError> {
    let config_key = parse_key(key)?;
    let config = ConfigFile::load_from(path)?;
    let value = config_key.get(&config);
    Ok(if value.is_empty() {
        "(not set)".to_string()
    } else {
        value
    })
}

fn set_value(path: &Path, key: &str, value: &str) -> Result<ConfigKey, CliError> {
    let config_key = parse_key(key)?;
    let mut config = ConfigFile::load_from(path)?;
    config_key.set(&mut config, value)?;
    config.save_to(path)?;
    Ok(config_key)
}

fn render_list(config: &ConfigFile) -> String {
    let mut out = String::from("Configuration Settings\n======================\n");
    let mut current_section = "";

    for key in ConfigKey::all() {
        let section = key.section();

        // Section header when the section changes
        if section != current_section {
            out.push_str(&format!("\n[{}]\n", section));
            current_section = section;
        }

        let value = key.get(config);
        if value.is_empty() {
            out.push_str(&format!("  {} = (not set)\n", key.key_name()));
        } else {
            out.push_str(&format!("  {} = {}\n", key.key_name(), value));
        }
    }

    out
}
