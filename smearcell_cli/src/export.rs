//! JSON snapshot export for external tooling.

use smearcell_core::CellSnapshot;
use std::fs::File;
use std::io::Write;
use thiserror::Error;

/// Failure while writing a snapshot file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write snapshot file: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes a snapshot as pretty-printed JSON.
pub fn write_snapshot(snapshot: &CellSnapshot, path: &str) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
