// crates/seccat-core/src/error.rs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatError>;

/// Failure to obtain a readable handle for a named input.
#[derive(Debug, Error)]
pub enum AccessError {
    /// lstat or open failed.
    #[error("{}", os_description(.source))]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission was denied and the path resolves through a symlink.
    #[error("refusing to follow symlink")]
    SymlinkRefused { path: PathBuf },
}

/// Mid-stream failure while transforming one input.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("{}", os_description(.0))]
    Read(#[source] io::Error),

    #[error("{}", os_description(.0))]
    Write(#[source] io::Error),

    #[error("cannot allocate {requested} bytes for escaped line")]
    Alloc { requested: usize },
}

#[derive(Debug, Error)]
pub enum CatError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl AccessError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            AccessError::Open { path, .. } | AccessError::SymlinkRefused { path } => path,
        }
    }
}

/// The OS description of `err` without std's ` (os error N)` suffix, so
/// diagnostics read like `strerror` output.
pub fn os_description(err: &io::Error) -> String {
    let text = err.to_string();
    match err.raw_os_error() {
        Some(code) => {
            let suffix = format!(" (os error {code})");
            text.strip_suffix(suffix.as_str()).unwrap_or(&text).to_string()
        }
        None => text,
    }
}
