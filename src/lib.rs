//! bogie renders trees of templates into configuration artifacts, one output
//! set per application, using per-application values overlays on top of
//! shared environment data.

/// Command-line interface module for the bogie application
pub mod cli;

/// Run configuration (bogie.yaml)
pub mod config;

/// Env and Values context construction
pub mod context;

/// Access to possibly encrypted environment and values sources
pub mod decrypt;

/// Error types and handling for the bogie application
pub mod error;

/// Filters and functions available inside templates
pub mod functions;

/// File and directory ignore patterns
/// Processes .bogieignore files to exclude specific entries
pub mod ignore;

/// Logging setup
pub mod logger;

/// Output formats: mirrored directory tree, single file, stdout
pub mod output;

/// Run orchestration
pub mod pipeline;

/// Template tree traversal into output units
pub mod processor;

/// Template rendering
pub mod renderer;
