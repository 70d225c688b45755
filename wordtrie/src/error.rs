use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to read or write one of the dictionary's files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not replace {}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}
