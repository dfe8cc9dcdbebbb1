//! Recursive template copying

use super::manifest::MANIFEST_FILE;
use crate::error::{ScaffoldError, ScaffoldResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// What a copy produced, relative to the target directory
#[derive(Debug, Clone, Default)]
pub struct CopySummary {
    pub files: Vec<PathBuf>,
    pub directories: Vec<PathBuf>,
}

/// Copy every file and directory under `source` into `target`.
///
/// Directories are recreated even when empty, files are copied byte-for-byte.
/// A `template.yaml` at the top of `source` is metadata and is skipped.
/// Existing files in `target` with the same relative path are overwritten.
pub async fn copy_tree(source: &Path, target: &Path) -> ScaffoldResult<CopySummary> {
    if !source.is_dir() {
        return Err(ScaffoldError::TemplateNotFound(source.to_path_buf()));
    }

    fs::create_dir_all(target)
        .await
        .map_err(|e| ScaffoldError::io(target, e))?;

    let mut summary = CopySummary::default();

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source).to_path_buf();
            ScaffoldError::io(path, e.into())
        })?;

        let relative = entry
            .path()
            .strip_prefix(source)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| PathBuf::from(entry.file_name()));

        if entry.depth() == 1 && entry.file_name() == MANIFEST_FILE {
            continue;
        }

        let destination = target.join(&relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)
                .await
                .map_err(|e| ScaffoldError::io(&destination, e))?;
            summary.directories.push(relative);
        } else {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ScaffoldError::io(parent, e))?;
            }
            fs::copy(entry.path(), &destination)
                .await
                .map_err(|e| ScaffoldError::io(entry.path(), e))?;
            debug!("Copied {}", relative.display());
            summary.files.push(relative);
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::tempdir;

    fn fixture(root: &Path) {
        stdfs::create_dir_all(root.join("src/routes")).unwrap();
        stdfs::create_dir_all(root.join("public")).unwrap();
        stdfs::write(root.join(MANIFEST_FILE), "name: x\n").unwrap();
        stdfs::write(root.join("package.json"), "{}\n").unwrap();
        stdfs::write(root.join("src/index.ts"), "export {};\n").unwrap();
        stdfs::write(root.join("src/routes/logo.bin"), [0u8, 159, 146, 150]).unwrap();
    }

    #[tokio::test]
    async fn test_copies_files_and_empty_directories() {
        let src = tempdir().unwrap();
        let dst = tempdir().unwrap();
        fixture(src.path());

        let summary = copy_tree(src.path(), dst.path()).await.unwrap();

        assert!(dst.path().join("public").is_dir());
        assert!(dst.path().join("src/routes").is_dir());
        assert_eq!(
            stdfs::read(dst.path().join("src/routes/logo.bin")).unwrap(),
            vec![0u8, 159, 146, 150]
        );
        assert_eq!(summary.files.len(), 3);
        assert!(summary.directories.contains(&PathBuf::from("public")));
    }

    #[tokio::test]
    async fn test_skips_template_manifest() {
        let src = tempdir().unwrap();
        let dst = tempdir().unwrap();
        fixture(src.path());

        copy_tree(src.path(), dst.path()).await.unwrap();

        assert!(!dst.path().join(MANIFEST_FILE).exists());
    }

    #[tokio::test]
    async fn test_missing_source_is_fatal() {
        let dst = tempdir().unwrap();
        let missing = dst.path().join("does-not-exist");

        let err = copy_tree(&missing, dst.path()).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateNotFound(_)));
    }
}
