//! Vessel serialization and deserialization using `MessagePack`.
//!
//! This module provides functions for saving and loading vessel records
//! to/from files using the `MessagePack` binary format.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use stowage_foundation::{Error, ErrorKind, Result};
use tracing::debug;

use crate::record::VesselRecord;

fn io_error(action: &str, path: &Path, err: &std::io::Error) -> Error {
    Error::new(ErrorKind::IoError(format!(
        "failed to {action} file '{}': {err}",
        path.display()
    )))
}

/// Serializes vessel records to bytes using `MessagePack` format.
///
/// Uses named serialization so record fields are looked up by name on load.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(vessels: &[VesselRecord]) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(vessels)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes vessel records from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<Vec<VesselRecord>> {
    rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Saves vessel records to a file using `MessagePack` format.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(vessels: &[VesselRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(vessels)?;

    let file = File::create(path).map_err(|e| io_error("create", path, &e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write to", path, &e))?;
    writer.flush().map_err(|e| io_error("flush", path, &e))?;

    debug!(path = %path.display(), vessels = vessels.len(), bytes = bytes.len(), "saved vessels");
    Ok(())
}

/// Loads vessel records from a `MessagePack` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<VesselRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error("open", path, &e))?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path, &e))?;

    let vessels = from_bytes(&bytes)?;
    debug!(path = %path.display(), vessels = vessels.len(), "loaded vessels");
    Ok(vessels)
}
