pub mod trace;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::Counter;

pub use trace::{TraceParseError, parse_trace};

/// Anything that stops a trace file from becoming a list of counters.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: TraceParseError,
    },
}

/// Read and parse a trace file from disk.
pub fn parse_trace_file(path: impl AsRef<Path>) -> Result<Vec<Counter>, LoadError> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_trace(&data).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}
