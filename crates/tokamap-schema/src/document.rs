use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde_json::Value;

use crate::error::{Result, SchemaError};

/// Read and parse a JSON file, refusing anything larger than `max_bytes`.
pub fn read_json_file(path: &Path, max_bytes: usize) -> Result<Value> {
    let file = File::open(path).map_err(|err| io_failure(path, err))?;
    let metadata = file.metadata().map_err(|err| io_failure(path, err))?;

    if metadata.is_dir() {
        return Err(SchemaError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("is a directory"),
        });
    }
    if metadata.len() > max_bytes as u64 {
        return Err(SchemaError::DocumentTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: max_bytes,
        });
    }

    // The file may grow between stat and read; bound the read as well.
    let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
    let mut content = Vec::new();
    file.take(read_limit)
        .read_to_end(&mut content)
        .map_err(|err| io_failure(path, err))?;
    if content.len() > max_bytes {
        return Err(SchemaError::DocumentTooLarge {
            path: path.to_path_buf(),
            size: content.len() as u64,
            max: max_bytes,
        });
    }

    // Bytes that are not UTF-8 are a parse failure, not an I/O one.
    serde_json::from_slice(&content).map_err(|source| SchemaError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn io_failure(path: &Path, err: io::Error) -> SchemaError {
    if err.kind() == io::ErrorKind::NotFound {
        SchemaError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        SchemaError::Io {
            path: path.to_path_buf(),
            source: err,
        }
    }
}
