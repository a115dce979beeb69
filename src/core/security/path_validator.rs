use std::io;
use std::path::{Path, PathBuf};

use crate::core::config::SecurityConfig;

/// Errors that can occur while resolving a local path
#[derive(Debug, thiserror::Error)]
pub enum PathSecurityError {
    #[error("Path '{path}' is outside allowed root directory '{root}'")]
    OutsideRootDirectory { path: PathBuf, root: PathBuf },

    #[error("Symlink '{path}' is not allowed (MCP_ALLOW_SYMLINKS=false)")]
    SymlinkNotAllowed { path: PathBuf },

    #[error("Path does not exist: '{path}'")]
    PathNotFound { path: PathBuf },

    #[error("IO error for path '{path}': {error}")]
    IoError { path: PathBuf, error: io::Error },
}

/// Resolves a caller-supplied local path to its canonical form.
///
/// Without a configured root any existing path is accepted. With a root, the
/// canonical path (after `..` and symlink resolution) must stay inside the
/// canonical root, and a symlink given directly is refused when
/// `allow_symlinks` is off.
///
/// # Examples
///
/// ```rust,ignore
/// let config = Config::from_env();
/// let file = resolve_local_path("./site/index.html", &config.security)?;
/// ```
pub fn resolve_local_path(
    input_path: &str,
    security: &SecurityConfig,
) -> Result<PathBuf, PathSecurityError> {
    let path = Path::new(input_path);

    // symlink_metadata does not follow links, so a dangling link still "exists"
    if path.symlink_metadata().is_err() {
        return Err(PathSecurityError::PathNotFound {
            path: path.to_path_buf(),
        });
    }

    let Some(root) = &security.root_path else {
        return canonicalize(path);
    };

    let canonical_root = canonicalize(root)?;

    if path.is_symlink() && !security.allow_symlinks {
        return Err(PathSecurityError::SymlinkNotAllowed {
            path: path.to_path_buf(),
        });
    }

    let canonical_path = canonicalize(path)?;
    if !canonical_path.starts_with(&canonical_root) {
        return Err(PathSecurityError::OutsideRootDirectory {
            path: canonical_path,
            root: canonical_root,
        });
    }

    Ok(canonical_path)
}

fn canonicalize(path: &Path) -> Result<PathBuf, PathSecurityError> {
    path.canonicalize().map_err(|error| {
        if error.kind() == io::ErrorKind::NotFound {
            PathSecurityError::PathNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PathSecurityError::IoError {
                path: path.to_path_buf(),
                error,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn security(root: Option<PathBuf>, allow_symlinks: bool) -> SecurityConfig {
        SecurityConfig {
            root_path: root,
            allow_symlinks,
        }
    }

    #[test]
    fn test_no_root_accepts_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("index.html");
        fs::write(&file, "<html></html>").unwrap();

        let resolved = resolve_local_path(file.to_str().unwrap(), &security(None, true)).unwrap();
        assert_eq!(resolved, file.canonicalize().unwrap());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.txt");

        let result = resolve_local_path(missing.to_str().unwrap(), &security(None, true));
        assert!(matches!(result, Err(PathSecurityError::PathNotFound { .. })));
    }

    #[test]
    fn test_file_inside_root() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("report.pdf");
        fs::write(&file, "pdf").unwrap();

        let config = security(Some(temp_dir.path().to_path_buf()), true);
        assert!(resolve_local_path(file.to_str().unwrap(), &config).is_ok());
    }

    #[test]
    fn test_traversal_out_of_root_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("public");
        fs::create_dir(&root).unwrap();
        fs::write(temp_dir.path().join("secret.txt"), "nope").unwrap();

        let config = security(Some(root.clone()), true);
        let escaped = root.join("../secret.txt");
        let result = resolve_local_path(escaped.to_str().unwrap(), &config);

        assert!(matches!(
            result,
            Err(PathSecurityError::OutsideRootDirectory { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_rejected_when_disallowed() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.txt");
        let link = temp_dir.path().join("link.txt");
        fs::write(&target, "data").unwrap();
        symlink(&target, &link).unwrap();

        let allowed = security(Some(temp_dir.path().to_path_buf()), true);
        assert!(resolve_local_path(link.to_str().unwrap(), &allowed).is_ok());

        let denied = security(Some(temp_dir.path().to_path_buf()), false);
        let result = resolve_local_path(link.to_str().unwrap(), &denied);
        assert!(matches!(
            result,
            Err(PathSecurityError::SymlinkNotAllowed { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escaping_root_rejected() {
        use std::os::unix::fs::symlink;

        let root_dir = TempDir::new().unwrap();
        let outside_dir = TempDir::new().unwrap();
        let target = outside_dir.path().join("target.txt");
        let link = root_dir.path().join("link.txt");
        fs::write(&target, "data").unwrap();
        symlink(&target, &link).unwrap();

        let config = security(Some(root_dir.path().to_path_buf()), true);
        let result = resolve_local_path(link.to_str().unwrap(), &config);
        assert!(matches!(
            result,
            Err(PathSecurityError::OutsideRootDirectory { .. })
        ));
    }
}
