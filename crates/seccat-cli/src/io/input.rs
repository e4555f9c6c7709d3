// crates/seccat-cli/src/io/input.rs

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read, StdinLock};
use std::path::{Path, PathBuf};

use seccat_core::AccessError;

/// One entry of the input list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSpec {
    Stdin,
    Path(PathBuf),
}

impl InputSpec {
    /// `-` names standard input; everything else is a path.
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            InputSpec::Stdin
        } else {
            InputSpec::Path(arg.to_path_buf())
        }
    }

    /// Name used in per-input diagnostics.
    pub fn label(&self) -> Cow<'_, str> {
        match self {
            InputSpec::Stdin => Cow::Borrowed("stdin"),
            InputSpec::Path(p) => p.to_string_lossy(),
        }
    }

    /// Acquire a readable stream. Named paths go through the access
    /// policy; stdin never does.
    pub fn open(&self, follow_symlinks: bool) -> Result<InputSource, AccessError> {
        match self {
            InputSpec::Stdin => Ok(InputSource::Stdin(io::stdin().lock())),
            InputSpec::Path(p) => seccat_core::resolve(p, follow_symlinks).map(InputSource::File),
        }
    }
}

/// No paths at all means "read stdin".
pub fn input_list(files: &[PathBuf]) -> Vec<InputSpec> {
    if files.is_empty() {
        return vec![InputSpec::Stdin];
    }
    files.iter().map(|f| InputSpec::from_arg(f)).collect()
}

/// An open input. The owning job releases it with [`InputSource::close`]
/// whether or not the transform succeeded.
pub enum InputSource {
    Stdin(StdinLock<'static>),
    File(File),
}

impl InputSource {
    /// Release the handle, reporting a failed `close(2)`. Stdin is only
    /// unlocked, never closed.
    pub fn close(self) -> io::Result<()> {
        match self {
            InputSource::Stdin(_) => Ok(()),
            InputSource::File(file) => close_file(file),
        }
    }
}

#[cfg(unix)]
fn close_file(file: File) -> io::Result<()> {
    use std::os::fd::IntoRawFd;

    nix::unistd::close(file.into_raw_fd()).map_err(io::Error::from)
}

#[cfg(not(unix))]
fn close_file(file: File) -> io::Result<()> {
    drop(file);
    Ok(())
}

impl Read for InputSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            InputSource::Stdin(s) => s.read(buf),
            InputSource::File(f) => f.read(buf),
        }
    }
}
