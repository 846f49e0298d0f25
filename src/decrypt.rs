//! Access to environment and values sources.
//! Sources may be encrypted at rest; the [`Decryptor`] trait is the seam where
//! a decrypting backend plugs in.

use crate::error::{Error, Result};
use log::debug;
use std::path::Path;

/// Trait for turning a source file into plaintext.
pub trait Decryptor {
    /// Returns the plaintext of `path`.
    ///
    /// # Arguments
    /// * `path` - Source file
    /// * `format` - Expected content format of the plaintext, e.g. `"yaml"`
    ///
    /// # Returns
    /// * `Ok(None)` if the source does not exist
    /// * `Ok(Some(text))` with the plaintext, or the content unmodified if it is not encrypted
    fn decrypt(&self, path: &Path, format: &str) -> Result<Option<String>>;
}

/// Reads sources as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextDecryptor;

impl PlaintextDecryptor {
    pub fn new() -> Self {
        Self
    }
}

impl Decryptor for PlaintextDecryptor {
    fn decrypt(&self, path: &Path, format: &str) -> Result<Option<String>> {
        if !path.exists() {
            debug!("Source {} does not exist", path.display());
            return Ok(None);
        }
        if path.is_dir() {
            return Err(Error::DecryptError {
                path: path.display().to_string(),
                reason: format!("expected a {format} file, found a directory"),
            });
        }

        debug!("Reading {format} source {}", path.display());
        std::fs::read_to_string(path).map(Some).map_err(|e| Error::io_at(path, e))
    }
}
