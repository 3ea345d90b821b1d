//! Configuration schema and loading for shelf.
//!
//! The configuration is a YAML document describing global settings, global
//! variables and a tree of command entries. A commented starter config is
//! written on first run, and a minimal built-in config is used as a fallback
//! when loading fails.

use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default path for the configuration file
const DEFAULT_CONFIG_PATH: &str = "~/.config/shelf/config.yaml";

/// Default shell to use for command execution
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// A predefined option for a choice variable.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VariableOption {
    pub label: String,
    pub value: String,
}

/// Configuration for a command variable.
///
/// A variable with options is presented as a choice field; one without
/// options is presented as a free-text field.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VariableConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub default: Option<String>,
    #[serde(default)]
    pub options: Vec<VariableOption>,
}

/// One entry in the command tree as it appears in YAML.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ConfigNode {
    pub name: String,
    #[serde(default)]
    pub expanded: bool,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub description: String,
    pub confirm: Option<bool>,
    #[serde(default)]
    pub variables: Vec<VariableConfig>,
    #[serde(default)]
    pub children: Vec<ConfigNode>,
}

/// Global application settings.
///
/// `confirm` is a tri-state: an absent value is not the same as an explicit
/// `false`, and resolves to `true`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    pub confirm: Option<bool>,
}

impl Settings {
    #[must_use]
    pub fn confirm_default(&self) -> bool {
        self.confirm.unwrap_or(true)
    }
}

/// The main configuration structure.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub variables: Vec<VariableConfig>,
    #[serde(default)]
    pub commands: Vec<ConfigNode>,
}

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

/// Creates the starter configuration file if none exists yet.
///
/// # Errors
///
/// Returns an error if the config directory or file cannot be created.
pub fn ensure_config_exists(config_path: &str) -> Result<()> {
    let path = Path::new(config_path);
    if path.exists() {
        return Ok(());
    }

    if let Some(config_dir) = path.parent() {
        fs::create_dir_all(config_dir).map_err(|e| {
            Error::io_error("config directory".to_string(), config_path.to_string(), e)
        })?;
    }

    fs::write(path, STARTER_CONFIG)
        .map_err(|e| Error::io_error("config".to_string(), config_path.to_string(), e))?;

    info!("Created starter config at `{config_path}`");
    Ok(())
}

impl Config {
    /// Loads configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains YAML that
    /// does not match the expected structure.
    pub fn load_from_file(config_path: &str) -> Result<Self> {
        let config_reader = match fs::File::open(config_path) {
            Ok(reader) => reader,
            Err(e) => {
                return Err(Error::io_error(
                    "config".to_string(),
                    config_path.to_string(),
                    e,
                ))
            }
        };

        let parsing_result: serde_yaml::Result<Config> = serde_yaml::from_reader(config_reader);

        parsing_result.map_err(|e| {
            Error::yaml_error(
                "reading".to_string(),
                "config".to_string(),
                config_path.to_string(),
                e,
            )
        })
    }

    /// Loads configuration, creating the starter config on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be created, read or parsed.
    /// Callers that want to keep running should fall back to
    /// [`Config::fallback`].
    pub fn load(config_path_arg: &Option<String>) -> Result<Self> {
        let config_path = get_config_path(config_path_arg);
        ensure_config_exists(&config_path)?;
        Self::load_from_file(&config_path)
    }

    /// Returns the minimal built-in configuration used when loading fails.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            name: "shelf - Command Launcher".to_string(),
            description: "Fallback configuration".to_string(),
            settings: Settings {
                confirm: Some(true),
            },
            variables: Vec::new(),
            commands: vec![ConfigNode {
                name: "System".to_string(),
                children: vec![
                    ConfigNode {
                        name: "List Files".to_string(),
                        command: "ls -la".to_string(),
                        description: "List all files".to_string(),
                        ..ConfigNode::default()
                    },
                    ConfigNode {
                        name: "Current Dir".to_string(),
                        command: "pwd".to_string(),
                        description: "Show current directory".to_string(),
                        ..ConfigNode::default()
                    },
                ],
                ..ConfigNode::default()
            }],
        }
    }
}

/// Written to disk the first time shelf runs without a config file.
const STARTER_CONFIG: &str = r#"name: "shelf - Command Launcher"
description: "An interactive launcher for your shell commands"

settings:
  confirm: true

# Global variables - available to all commands
variables:
  - name: "host"
    description: "Default target hostname or IP"
    default: "localhost"
    options:
      - label: "Local (localhost)"
        value: "localhost"
      - label: "Production Server"
        value: "prod.example.com"
      - label: "Development Server"
        value: "dev.example.com"
      - label: "Custom..."
        value: "custom"
  - name: "user"
    description: "Default username"
    default: "root"

commands:
  - name: "System"
    expanded: false
    children:
      - name: "List Files"
        command: "ls -la"
        description: "List all files in current directory"
        confirm: false

      - name: "Disk Usage"
        command: "df -h"
        description: "Show disk space usage"
        confirm: false

      - name: "Memory Info"
        command: "free -h || top -l 1 | head -n 10"
        description: "Show memory usage (Linux/macOS compatible)"
        confirm: false

  - name: "Network"
    expanded: false
    children:
      - name: "Ping Host"
        command: "ping -c {count} {host}"
        description: "Ping a host with specified count"
        confirm: false
        variables:
          - name: "count"
            description: "Number of ping attempts"
            default: "4"
            options:
              - label: "Quick (1 ping)"
                value: "1"
              - label: "Normal (4 pings)"
                value: "4"
              - label: "Extended (10 pings)"
                value: "10"
              - label: "Custom..."
                value: "custom"
          - name: "host"
            description: "Target hostname or IP"
            default: "google.com"

      - name: "Check Port"
        command: "nc -zv {host} {port}"
        description: "Check if a port is open on a host"
        confirm: false
        variables:
          - name: "host"
            description: "Target hostname or IP"
            default: "localhost"
          - name: "port"
            description: "Port number to check"
            default: "80"
            options:
              - label: "HTTP (80)"
                value: "80"
              - label: "HTTPS (443)"
                value: "443"
              - label: "SSH (22)"
                value: "22"
              - label: "Custom..."
                value: "custom"

      - name: "SSH Connect"
        command: "ssh {user}@{host}"
        description: "Connect to a server via SSH (uses global variables)"
        confirm: false

  - name: "Development"
    expanded: false
    children:
      - name: "Git Status"
        command: "git status"
        description: "Show git repository status"
        confirm: false

      - name: "Git Log"
        command: "git log --oneline -n {count}"
        description: "Show recent git commits"
        confirm: false
        variables:
          - name: "count"
            description: "Number of commits to show"
            default: "10"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_get_config_path_with_custom_path() {
        let custom_path = Some("/custom/path/config.yaml".to_string());
        let result = get_config_path(&custom_path);
        assert_eq!(result, "/custom/path/config.yaml");
    }

    #[test]
    fn test_get_config_path_with_none() {
        let result = get_config_path(&None);
        // Should expand the tilde in the default path
        assert!(result.contains("config.yaml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_load_from_file_valid_yaml() {
        let yaml_content = r#"
name: "Test Launcher"
settings:
  confirm: false
commands:
  - name: "Group"
    children:
      - name: "Hello"
        command: "echo hello"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{yaml_content}").unwrap();
        let temp_path = temp_file.path().to_str().unwrap();

        let config = Config::load_from_file(temp_path).unwrap();
        assert_eq!(config.name, "Test Launcher");
        assert_eq!(config.settings.confirm, Some(false));
        assert_eq!(config.commands.len(), 1);
        assert_eq!(config.commands[0].children.len(), 1);
        assert_eq!(config.commands[0].children[0].command, "echo hello");
    }

    #[test]
    fn test_load_from_file_invalid_yaml() {
        let yaml_content = "invalid: yaml: content: [";

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{yaml_content}").unwrap();
        let temp_path = temp_file.path().to_str().unwrap();

        let result = Config::load_from_file(temp_path);
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = Config::load_from_file("/this/path/does/not/exist.yaml");
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_confirm_setting_is_tri_state() {
        let unset = Settings { confirm: None };
        assert!(unset.confirm_default());

        let explicit_false = Settings {
            confirm: Some(false),
        };
        assert!(!explicit_false.confirm_default());

        let explicit_true = Settings {
            confirm: Some(true),
        };
        assert!(explicit_true.confirm_default());
    }

    #[test]
    fn test_node_confirm_absent_vs_false() {
        let yaml_content = r#"
name: "Test"
commands:
  - name: "No Override"
    command: "ls"
  - name: "Explicit False"
    command: "ls"
    confirm: false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{yaml_content}").unwrap();
        let config = Config::load_from_file(temp_file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.commands[0].confirm, None);
        assert_eq!(config.commands[1].confirm, Some(false));
    }

    #[test]
    fn test_starter_config_parses() {
        let config: Config = serde_yaml::from_str(STARTER_CONFIG).unwrap();
        assert!(!config.commands.is_empty());
        assert_eq!(config.variables.len(), 2);
        assert_eq!(config.settings.confirm, Some(true));
    }

    #[test]
    fn test_ensure_config_exists_creates_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.yaml");
        let config_path = config_path.to_str().unwrap();

        ensure_config_exists(config_path).unwrap();
        assert!(Path::new(config_path).exists());

        // Second call is a no-op and must not fail
        ensure_config_exists(config_path).unwrap();
    }

    #[test]
    fn test_fallback_config() {
        let config = Config::fallback();
        assert!(!config.commands.is_empty());
        assert!(config.settings.confirm_default());
    }
}
