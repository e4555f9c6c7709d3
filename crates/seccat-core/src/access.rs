// crates/seccat-core/src/access.rs
//
// Opening named inputs under the symlink policy.
//
// With follow_symlinks=false a permission failure on a path whose
// canonical form differs from the path as given is reported as a symlink
// refusal instead of a bare EACCES. This is a diagnostic heuristic: a
// readable link target is still opened transparently, and the
// check-then-report gap is not race free.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::AccessError;

/// Open `path` for reading. The returned handle is owned by the caller
/// and closed when dropped.
pub fn resolve(path: &Path, follow_symlinks: bool) -> Result<File, AccessError> {
    // lstat first so a missing path is reported before any open attempt.
    fs::symlink_metadata(path).map_err(|source| AccessError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    match File::open(path) {
        Ok(file) => Ok(file),
        Err(source) if follow_symlinks => Err(AccessError::Open {
            path: path.to_path_buf(),
            source,
        }),
        Err(source) => Err(classify_open_failure(path, source)),
    }
}

/// Map a failed open under the non-follow policy to an `AccessError`.
pub fn classify_open_failure(path: &Path, source: io::Error) -> AccessError {
    if source.kind() == io::ErrorKind::PermissionDenied && resolves_elsewhere(path) {
        debug!(path = %path.display(), "permission denied through symlink");
        return AccessError::SymlinkRefused {
            path: path.to_path_buf(),
        };
    }
    AccessError::Open {
        path: path.to_path_buf(),
        source,
    }
}

/// True when symlink resolution moves `path` somewhere else.
pub fn resolves_elsewhere(path: &Path) -> bool {
    let canonical = match fs::canonicalize(path) {
        Ok(p) => p,
        Err(_) => return false,
    };
    match literal_absolute(path) {
        Some(literal) => canonical != literal,
        None => false,
    }
}

// Absolute, lexically normalised form of the path as written: joined
// onto the cwd, `.` dropped, `..` popping the previous component, no link
// resolution. Comparing against this keeps `sub/../plain` and relative
// names of plain files from looking like links.
fn literal_absolute(path: &Path) -> Option<PathBuf> {
    let absolute = std::path::absolute(path).ok()?;
    let mut normalised = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalised.pop();
            }
            other => normalised.push(other.as_os_str()),
        }
    }
    Some(normalised)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denied() -> io::Error {
        io::Error::from(io::ErrorKind::PermissionDenied)
    }

    #[test]
    fn missing_path_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve(&dir.path().join("nope"), false).unwrap_err();
        match err {
            AccessError::Open { source, .. } => assert_eq!(source.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn plain_file_is_not_elsewhere() {
        let dir = tempfile::tempdir().unwrap();
        let target = fs::canonicalize(dir.path()).unwrap().join("plain.txt");
        fs::write(&target, b"x").unwrap();
        assert!(!resolves_elsewhere(&target));
    }

    #[cfg(unix)]
    #[test]
    fn permission_denied_through_symlink_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target.txt");
        let link = dir.path().join("link.txt");
        fs::write(&target, b"secret").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = classify_open_failure(&link, denied());
        assert!(matches!(err, AccessError::SymlinkRefused { .. }), "{err:?}");
        assert_eq!(err.to_string(), "refusing to follow symlink");
    }

    #[test]
    fn permission_denied_on_plain_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = fs::canonicalize(dir.path()).unwrap().join("plain.txt");
        fs::write(&target, b"x").unwrap();

        let err = classify_open_failure(&target, denied());
        assert!(matches!(err, AccessError::Open { .. }), "{err:?}");
    }

    #[test]
    fn parent_components_on_plain_file_are_not_refusals() {
        let dir = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("locked.txt"), b"x").unwrap();

        let dotted = root.join("sub").join("..").join(".").join("locked.txt");
        assert!(!resolves_elsewhere(&dotted));
        let err = classify_open_failure(&dotted, denied());
        assert!(matches!(err, AccessError::Open { .. }), "{err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn parent_components_through_symlinked_dir_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        fs::create_dir_all(root.join("real").join("inner")).unwrap();
        fs::write(root.join("real").join("locked.txt"), b"x").unwrap();
        std::os::unix::fs::symlink(root.join("real").join("inner"), root.join("alias")).unwrap();

        // alias/.. is `real` on disk, not `root`.
        let path = root.join("alias").join("..").join("locked.txt");
        let err = classify_open_failure(&path, denied());
        assert!(matches!(err, AccessError::SymlinkRefused { .. }), "{err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn other_errors_through_symlink_are_not_refusals() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target.txt");
        let link = dir.path().join("link.txt");
        fs::write(&target, b"x").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = classify_open_failure(&link, io::Error::from(io::ErrorKind::Other));
        assert!(matches!(err, AccessError::Open { .. }));
    }
}
