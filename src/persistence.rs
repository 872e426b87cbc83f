use std::{fs, io::Write, path::Path};

use crate::errors::StoreError;
use crate::state::record::Record;

/// Read the record file at `path`.
///
/// Returns `Ok(None)` when the file does not exist so the caller can seed it.
/// An empty file is an empty collection.
pub fn load_records(path: &Path) -> Result<Option<Vec<Record>>, StoreError> {
    let data = match fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No data file found (path = {})", path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(StoreError::Io {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    if data.trim().is_empty() {
        return Ok(Some(Vec::new()));
    }

    let records: Vec<Record> =
        serde_json::from_str(&data).map_err(|e| StoreError::Decode {
            path: path.display().to_string(),
            source: e,
        })?;

    tracing::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(Some(records))
}

/// Serialize the whole collection and replace the file contents.
///
/// With `atomic` the bytes go to `<path>.tmp` first and are renamed over
/// `path`, so a crash mid-write leaves the previous file intact.
pub fn write_records(path: &Path, records: &[Record], atomic: bool) -> Result<(), StoreError> {
    let json = serde_json::to_vec(records).map_err(StoreError::Encode)?;

    let io_err = |e: std::io::Error| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    };

    if atomic {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let tmp = path.with_extension(format!("{ext}.tmp"));
        write_file(&tmp, &json).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;
    } else {
        write_file(path, &json).map_err(io_err)?;
    }

    tracing::debug!("Persisted {} records to {}", records.len(), path.display());
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
