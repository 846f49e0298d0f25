//! Run configuration for bogie.
//! Loads the YAML configuration file that lists applications, their template
//! roots and values overlays, and how rendered output is delivered.

use crate::error::{Error, Result};
use crate::output::OutputFormat;
use crate::renderer::{DEFAULT_LEFT_DELIM, DEFAULT_RIGHT_DELIM};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE: &str = "bogie.yaml";

fn default_ldelim() -> String {
    DEFAULT_LEFT_DELIM.to_string()
}

fn default_rdelim() -> String {
    DEFAULT_RIGHT_DELIM.to_string()
}

fn default_out_format() -> String {
    OutputFormat::Dir.to_string()
}

fn default_out_path() -> PathBuf {
    PathBuf::from("releases")
}

fn default_out_file() -> String {
    "manifest.yaml".to_string()
}

/// Accepts either a single path or a list of paths.
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(PathBuf),
        Many(Vec<PathBuf>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(path)) => vec![path],
        Some(OneOrMany::Many(paths)) => paths,
        None => Vec::new(),
    })
}

/// One unit of configuration generation.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    pub name: String,
    /// Template root directory
    pub templates: PathBuf,
    /// Values overlay files, deep-merged in order
    #[serde(default, deserialize_with = "one_or_many")]
    pub values: Vec<PathBuf>,
    /// Environment source replacing the global one for this application
    #[serde(default)]
    pub env_file: Option<PathBuf>,
    /// `dotted.key=value` overrides applied on top of the values files
    #[serde(default)]
    pub override_vars: Vec<String>,
    /// Silences the missing-values warning for this application
    #[serde(default)]
    pub mute_warning: bool,
}

impl ApplicationConfig {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(name: S, templates: P) -> Self {
        Self {
            name: name.into(),
            templates: templates.into(),
            values: Vec::new(),
            env_file: None,
            override_vars: Vec::new(),
            mute_warning: false,
        }
    }
}

/// The run configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_ldelim")]
    pub ldelim: String,
    #[serde(default = "default_rdelim")]
    pub rdelim: String,
    #[serde(default)]
    pub env_file: Option<PathBuf>,
    /// One of `dir`, `file` or `stdout`
    #[serde(default = "default_out_format")]
    pub out_format: String,
    #[serde(default = "default_out_path")]
    pub out_path: PathBuf,
    /// File name inside `out_path` used by the `file` format
    #[serde(default = "default_out_file")]
    pub out_file: String,
    /// Only applications whose name matches are processed
    #[serde(default)]
    pub app_regex: Option<String>,
    /// Global ignore rules applied to every template directory
    #[serde(default)]
    pub ignore_file: Option<PathBuf>,
    /// Remove previously rendered files whose template now renders empty
    #[serde(default)]
    pub prune: bool,
    #[serde(default)]
    pub applications: Vec<ApplicationConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ldelim: default_ldelim(),
            rdelim: default_rdelim(),
            env_file: None,
            out_format: default_out_format(),
            out_path: default_out_path(),
            out_file: default_out_file(),
            app_regex: None,
            ignore_file: None,
            prune: false,
            applications: Vec::new(),
        }
    }
}

impl Config {
    /// Parses the configured output format.
    ///
    /// # Errors
    /// * `Error::UnknownOutputFormat` for anything but `dir`, `file` or `stdout`
    pub fn output_format(&self) -> Result<OutputFormat> {
        self.out_format.parse()
    }

    /// Path of the single output file used by the `file` format.
    pub fn out_file_path(&self) -> PathBuf {
        self.out_path.join(&self.out_file)
    }

    /// Checks everything that can be checked before any output is produced.
    pub fn validate(&self) -> Result<()> {
        let format = self.output_format()?;

        if self.ldelim.is_empty() || self.rdelim.is_empty() {
            return Err(Error::ConfigError("template delimiters must not be empty".to_string()));
        }
        if format == OutputFormat::File && self.out_file.trim().is_empty() {
            return Err(Error::ConfigError("out_file is required for the file format".to_string()));
        }

        let mut names = HashSet::new();
        for app in &self.applications {
            if app.name.trim().is_empty() {
                return Err(Error::ConfigError("application name must not be empty".to_string()));
            }
            if !names.insert(app.name.as_str()) {
                return Err(Error::ConfigError(format!("duplicate application '{}'", app.name)));
            }
        }

        self.app_filter()?;
        Ok(())
    }

    fn app_filter(&self) -> Result<Option<Regex>> {
        self.app_regex
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    Error::ConfigError(format!("invalid app_regex '{pattern}': {e}"))
                })
            })
            .transpose()
    }

    /// Applications to process, in configured order, after `app_regex` filtering.
    pub fn selected_applications(&self) -> Result<Vec<&ApplicationConfig>> {
        let filter = self.app_filter()?;
        Ok(self
            .applications
            .iter()
            .filter(|app| match &filter {
                Some(re) => {
                    let selected = re.is_match(&app.name);
                    if !selected {
                        debug!("Skipping application '{}' not matching app_regex", app.name);
                    }
                    selected
                }
                None => true,
            })
            .collect())
    }
}

/// Parses configuration content.
///
/// Values are not checked here; command-line overrides may still replace
/// them, so callers run [`Config::validate`] once the configuration is final.
///
/// # Errors
/// * `Error::ConfigError` if the content is not a valid configuration document
pub fn parse_config(content: &str) -> Result<Config> {
    serde_yaml::from_str(content)
        .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}")))
}

/// Loads the configuration file at `path`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::ConfigError(format!(
            "Invalid configuration path: {}",
            path.display()
        )));
    }

    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| Error::io_at(path, e))?;
    parse_config(&content)
}
