//! Delivery of rendered output units.
//! The output format is chosen once per run; each [`Output`] variant accepts
//! rendered units in traversal order and drops the empty ones.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::processor::OutputUnit;
use crate::renderer::RenderResult;
use log::{debug, error};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Written before every non-empty document in `file` and `stdout` formats.
pub const DOCUMENT_SEPARATOR: &str = "\n---\n";

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One file per output unit, mirroring the template tree
    Dir,
    /// All documents concatenated into a single file
    File,
    /// All documents concatenated onto standard output
    Stdout,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dir" => Ok(OutputFormat::Dir),
            "file" => Ok(OutputFormat::File),
            "stdout" => Ok(OutputFormat::Stdout),
            other => Err(Error::UnknownOutputFormat { format: other.to_string() }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Dir => "dir",
            OutputFormat::File => "file",
            OutputFormat::Stdout => "stdout",
        };
        write!(f, "{name}")
    }
}

/// Destination for rendered output units.
pub enum Output {
    /// Writes each unit to its own output path.
    PerEntry { prune: bool },
    /// Appends every unit to one truncated file.
    SingleFile { path: PathBuf, writer: BufWriter<File> },
    /// Appends every unit to a stream, normally standard output.
    Stream { writer: Box<dyn Write> },
}

impl Output {
    /// Per-entry output; with `prune`, files of units that now render empty are removed.
    pub fn per_entry(prune: bool) -> Self {
        Output::PerEntry { prune }
    }

    /// Opens `path` for single-file output, creating its directory and truncating it.
    pub fn single_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io_at(parent, e))?;
        }
        let file = File::create(&path).map_err(|e| Error::io_at(&path, e))?;
        debug!("Writing documents to {}", path.display());
        Ok(Output::SingleFile { path, writer: BufWriter::new(file) })
    }

    pub fn stream<W: Write + 'static>(writer: W) -> Self {
        Output::Stream { writer: Box::new(writer) }
    }

    pub fn stdout() -> Self {
        Self::stream(io::stdout())
    }

    /// Opens the output selected by `config`.
    pub fn open(config: &Config) -> Result<Self> {
        match config.output_format()? {
            OutputFormat::Dir => Ok(Self::per_entry(config.prune)),
            OutputFormat::File => Self::single_file(config.out_file_path()),
            OutputFormat::Stdout => Ok(Self::stdout()),
        }
    }

    /// Delivers one rendered unit. Empty results produce no output.
    pub fn deliver(&mut self, unit: &OutputUnit, result: &RenderResult) -> Result<()> {
        match self {
            Output::PerEntry { prune } => write_entry(&unit.output_path, result, *prune),
            Output::SingleFile { path, writer } => {
                write_document(writer, result).map_err(|e| Error::io_at(&*path, e))
            }
            Output::Stream { writer } => {
                write_document(writer, result).map_err(|e| Error::io_at("<stdout>", e))
            }
        }
    }

    /// Flushes buffered output.
    ///
    /// Flush failures are logged and do not fail the run, since the
    /// documents have already been handed to the destination.
    pub fn finalize(self) -> Result<()> {
        match self {
            Output::PerEntry { .. } => {}
            Output::SingleFile { path, mut writer } => {
                if let Err(e) = writer.flush() {
                    error!("failed to flush output to {}: {e}", path.display());
                }
            }
            Output::Stream { mut writer } => {
                if let Err(e) = writer.flush() {
                    error!("failed to flush output stream: {e}");
                }
            }
        }
        Ok(())
    }
}

fn write_entry(path: &Path, result: &RenderResult, prune: bool) -> Result<()> {
    if result.is_empty {
        if path.is_file() {
            if prune {
                debug!("Removing stale file: {}", path.display());
                fs::remove_file(path).map_err(|e| Error::io_at(path, e))?;
            } else {
                debug!("Leaving stale file in place: {}", path.display());
            }
        } else {
            debug!("Skipping empty output: {}", path.display());
        }
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io_at(parent, e))?;
    }
    debug!("Writing file: {}", path.display());
    fs::write(path, &result.content).map_err(|e| Error::io_at(path, e))
}

fn write_document<W: Write + ?Sized>(writer: &mut W, result: &RenderResult) -> io::Result<()> {
    if result.is_empty {
        return Ok(());
    }
    writer.write_all(DOCUMENT_SEPARATOR.as_bytes())?;
    writer.write_all(result.content.as_bytes())
}
