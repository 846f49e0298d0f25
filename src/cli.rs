//! Command-line interface implementation for bogie.
//! Provides argument parsing and the mapping of flags onto the run configuration.

use crate::config::{Config, CONFIG_FILE};
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for bogie.
#[derive(Parser, Debug)]
#[command(author, version, about = "bogie: render template trees into configuration artifacts", long_about = None)]
pub struct Args {
    /// Path to the run configuration file
    #[arg(short, long, value_name = "CONFIG", default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Output format: dir, file or stdout
    #[arg(long, value_name = "FORMAT")]
    pub out_format: Option<String>,

    /// Directory rendered output is written to
    #[arg(long, value_name = "DIR")]
    pub out_path: Option<PathBuf>,

    /// Output file name used by the file format
    #[arg(long, value_name = "FILE")]
    pub out_file: Option<String>,

    /// Environment source shared by all applications
    #[arg(long, value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Only process applications whose name matches this regular expression
    #[arg(long, value_name = "REGEX")]
    pub app_regex: Option<String>,

    /// Global ignore rules applied to every template directory
    #[arg(long, value_name = "FILE")]
    pub ignore_file: Option<PathBuf>,

    /// Left template delimiter
    #[arg(long, value_name = "DELIM")]
    pub ldelim: Option<String>,

    /// Right template delimiter
    #[arg(long, value_name = "DELIM")]
    pub rdelim: Option<String>,

    /// Remove previously rendered files whose template now renders empty
    #[arg(long)]
    pub prune: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Applies command-line overrides on top of `config` and re-validates it.
    pub fn apply_to(&self, config: &mut Config) -> Result<()> {
        if let Some(format) = &self.out_format {
            config.out_format = format.clone();
        }
        if let Some(path) = &self.out_path {
            config.out_path = path.clone();
        }
        if let Some(file) = &self.out_file {
            config.out_file = file.clone();
        }
        if let Some(env_file) = &self.env_file {
            config.env_file = Some(env_file.clone());
        }
        if let Some(regex) = &self.app_regex {
            config.app_regex = Some(regex.clone());
        }
        if let Some(ignore_file) = &self.ignore_file {
            config.ignore_file = Some(ignore_file.clone());
        }
        if let Some(ldelim) = &self.ldelim {
            config.ldelim = ldelim.clone();
        }
        if let Some(rdelim) = &self.rdelim {
            config.rdelim = rdelim.clone();
        }
        if self.prune {
            config.prune = true;
        }
        config.validate()
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for argument errors
pub fn get_args() -> Args {
    Args::parse()
}
