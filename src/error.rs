//! Error handling for bogie.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors that can abort a bogie run.
///
/// Every variant is fatal for the run. Warnings for missing environment or
/// values sources are not errors and are only logged.
#[derive(Error, Debug)]
pub enum Error {
    /// File system failure without a known path
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// File system failure on a specific path
    #[error("IO error on '{path}': {source}.")]
    PathIoError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Invalid or inconsistent run configuration
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The output format selector is not one of `dir`, `file` or `stdout`
    #[error("Unknown output format: '{format}'.")]
    UnknownOutputFormat { format: String },

    /// An application's template root cannot be read
    #[error("Template directory '{template_dir}' of application '{app}' does not exist.")]
    TemplateRootMissing { app: String, template_dir: String },

    /// An environment or values source is not valid YAML
    #[error("Failed to parse '{path}': {source}.")]
    ParseError {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// An environment or values source parsed but is not a mapping
    #[error("Failed to parse '{path}': {reason}.")]
    InvalidDocument { path: String, reason: String },

    /// An environment or values source could not be decrypted
    #[error("Failed to load '{path}': {reason}.")]
    DecryptError { path: String, reason: String },

    /// An ignore file contains an invalid pattern
    #[error("Ignore error: {0}.")]
    IgnoreError(String),

    /// A template failed to parse or execute
    #[error("Error when rendering '{path}': {source}.")]
    RenderError {
        path: String,
        #[source]
        source: minijinja::Error,
    },

    /// Template failure outside of a known output unit
    #[error("Template error: {0}.")]
    TemplateError(#[from] minijinja::Error),
}

impl Error {
    /// Wraps an io error together with the path it occurred on.
    pub fn io_at<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Error::PathIoError { path: path.as_ref().display().to_string(), source }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
