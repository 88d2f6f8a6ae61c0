use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{DataError, DataResult};

/// Parse one TOML document as a table of definitions keyed by id.
pub fn parse_table<T: DeserializeOwned>(origin: &str, content: &str) -> DataResult<HashMap<String, T>> {
    toml::from_str(content).map_err(|source| DataError::Parse {
        origin: origin.to_string(),
        source,
    })
}

/// Read every `.toml` file in `dir` as a table of definitions.
///
/// Files are visited in path order so later files deterministically
/// override earlier ones on duplicate ids. A missing directory yields no
/// tables.
pub fn read_table_dir<T: DeserializeOwned>(dir: &Path) -> DataResult<Vec<(String, HashMap<String, T>)>> {
    if !dir.exists() {
        warn!("Data directory does not exist: {:?}", dir);
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|source| io_error(dir, source))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| io_error(dir, source))?;
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == "toml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut tables = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read_to_string(&path).map_err(|source| io_error(&path, source))?;
        let origin = path.display().to_string();
        let table = parse_table(&origin, &content)?;
        debug!("Parsed {} entries from {}", table.len(), origin);
        tables.push((origin, table));
    }

    Ok(tables)
}

fn io_error(path: &Path, source: std::io::Error) -> DataError {
    DataError::Io {
        path: path.to_path_buf(),
        source,
    }
}
