//! Configuration management for the sobject CLI.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Config files (.sobject/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! Later sources take precedence over earlier ones.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::project::SfProject;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory the project is discovered from (defaults to the current directory)
    pub project: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    project: Option<ProjectConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProjectConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file, environment variables and defaults.
    ///
    /// Environment variables:
    /// - `SOBJECT_PROJECT`: Directory to discover the project from
    /// - `SOBJECT_CONFIG`: Path to config file
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use sobject_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Project: {:?}", config.project);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None, None)
    }

    /// Load configuration, with `project` and `config_file` taking precedence
    /// over their environment variables.
    ///
    /// The config file is resolved after both paths are known, so an explicit
    /// file or the `.sobject/config.yaml` of an explicit project is the one
    /// merged. An explicit `project` also wins over the file's `project.path`.
    pub fn load_from(project: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        let project = project.or_else(|| std::env::var_os("SOBJECT_PROJECT").map(PathBuf::from));
        let config_file =
            config_file.or_else(|| std::env::var_os("SOBJECT_CONFIG").map(PathBuf::from));

        if let Some(project) = &project {
            config.project = project.clone();
        }

        let config_path = match &config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Config file not found: {:?}",
                        path
                    )));
                }
                path.clone()
            }
            None => config.sobject_dir().join("config.yaml"),
        };
        config.config_file = config_file;

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        if let Some(project) = project {
            config.project = project;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(project) = config_file.project {
            if let Some(path) = project.path {
                result.project = PathBuf::from(path);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        tracing::debug!("Merged config file {:?}", path);

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over environment variables and
    /// the config file. Path flags are applied earlier, by [`AppConfig::load_from`].
    pub fn with_overrides(mut self, log_level: Option<String>, verbose: bool, no_color: bool) -> Self {
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .sobject directory.
    pub fn sobject_dir(&self) -> PathBuf {
        self.project.join(".sobject")
    }

    /// Load the Salesforce DX project containing `project`.
    pub fn load_project(&self) -> AppResult<SfProject> {
        SfProject::discover(&self.project)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if !self.project.exists() {
            return Err(AppError::Config(format!(
                "Project directory does not exist: {:?}",
                self.project
            )));
        }

        Ok(())
    }
}
