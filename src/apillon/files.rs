//! Local file loading for the upload tools.
//!
//! Files are read completely into memory before an upload session is opened,
//! so the largest uploadable file is bounded by available memory.

use std::io;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use super::error::{ApillonError, ApillonResult};
use super::types::FileUpload;
use crate::core::config::SecurityConfig;
use crate::core::security::resolve_local_path;

/// Read a single local file for upload into a bucket.
pub async fn load_file(
    file_path: &str,
    file_name: &str,
    directory_path: Option<&str>,
    security: &SecurityConfig,
) -> ApillonResult<FileUpload> {
    let resolved = resolve_local_path(file_path, security)?;
    if !resolved.is_file() {
        return Err(ApillonError::io(
            &resolved,
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }

    let content = tokio::fs::read(&resolved)
        .await
        .map_err(|e| ApillonError::io(&resolved, e))?;
    debug!("Loaded {} bytes from {}", content.len(), resolved.display());

    Ok(FileUpload {
        file_name: file_name.to_string(),
        path: directory_path.map(str::to_string),
        content,
    })
}

/// Read every regular file below `folder_path`, keeping each file's directory
/// relative to the folder as its upload path.
pub async fn load_folder(folder_path: &str, security: &SecurityConfig) -> ApillonResult<Vec<FileUpload>> {
    let root = resolve_local_path(folder_path, security)?;
    if !root.is_dir() {
        return Err(ApillonError::io(
            &root,
            io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        ));
    }

    let mut uploads = Vec::new();
    for entry in WalkDir::new(&root)
        .follow_links(security.allow_symlinks)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root.as_path()).to_path_buf();
            ApillonError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        // Re-check each file so a link inside the folder cannot leave the root.
        let file = resolve_local_path(&entry.path().to_string_lossy(), security)?;
        let content = tokio::fs::read(&file)
            .await
            .map_err(|e| ApillonError::io(&file, e))?;

        uploads.push(FileUpload {
            file_name: entry.file_name().to_string_lossy().into_owned(),
            path: relative_dir(&root, entry.path()),
            content,
        });
    }

    if uploads.is_empty() {
        return Err(ApillonError::io(
            &root,
            io::Error::new(io::ErrorKind::InvalidInput, "folder contains no files"),
        ));
    }

    info!("Loaded {} file(s) from {}", uploads.len(), root.display());
    Ok(uploads)
}

/// Directory of `file` relative to `root`, `/`-separated; `None` at the root.
fn relative_dir(root: &Path, file: &Path) -> Option<String> {
    let parent = file.parent()?.strip_prefix(root).ok()?;
    let parts: Vec<_> = parent
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_file_reads_content() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("notes.txt");
        fs::write(&file, "hello apillon").unwrap();

        let upload = load_file(
            file.to_str().unwrap(),
            "renamed.txt",
            Some("docs/2024"),
            &SecurityConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(upload.file_name, "renamed.txt");
        assert_eq!(upload.path.as_deref(), Some("docs/2024"));
        assert_eq!(upload.content, b"hello apillon");
    }

    #[tokio::test]
    async fn test_load_file_missing() {
        let result = load_file(
            "/nonexistent/path/12345.txt",
            "x.txt",
            None,
            &SecurityConfig::default(),
        )
        .await;
        assert!(matches!(result, Err(ApillonError::PathSecurity(_))));
    }

    #[tokio::test]
    async fn test_load_file_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_file(
            temp_dir.path().to_str().unwrap(),
            "dir",
            None,
            &SecurityConfig::default(),
        )
        .await;
        assert!(matches!(result, Err(ApillonError::Io { .. })));
    }

    #[tokio::test]
    async fn test_load_folder_keeps_relative_paths() {
        let temp_dir = TempDir::new().unwrap();
        let site = temp_dir.path();
        fs::write(site.join("index.html"), "<html></html>").unwrap();
        fs::create_dir_all(site.join("assets/css")).unwrap();
        fs::write(site.join("assets/css/site.css"), "body {}").unwrap();

        let uploads = load_folder(site.to_str().unwrap(), &SecurityConfig::default())
            .await
            .unwrap();

        assert_eq!(uploads.len(), 2);
        let css = uploads.iter().find(|u| u.file_name == "site.css").unwrap();
        assert_eq!(css.path.as_deref(), Some("assets/css"));
        let index = uploads.iter().find(|u| u.file_name == "index.html").unwrap();
        assert_eq!(index.path, None);
        assert_eq!(index.content, b"<html></html>");
    }

    #[tokio::test]
    async fn test_load_folder_empty_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_folder(temp_dir.path().to_str().unwrap(), &SecurityConfig::default()).await;
        assert!(matches!(result, Err(ApillonError::Io { .. })));
    }

    #[tokio::test]
    async fn test_load_folder_outside_root_rejected() {
        let root = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("index.html"), "x").unwrap();

        let security = SecurityConfig {
            root_path: Some(root.path().to_path_buf()),
            allow_symlinks: true,
        };
        let result = load_folder(outside.path().to_str().unwrap(), &security).await;
        assert!(matches!(result, Err(ApillonError::PathSecurity(_))));
    }

    #[test]
    fn test_relative_dir() {
        let root = PathBuf::from("/site");
        assert_eq!(relative_dir(&root, Path::new("/site/index.html")), None);
        assert_eq!(
            relative_dir(&root, Path::new("/site/a/b/c.js")),
            Some("a/b".to_string())
        );
    }
}
