//! Protection of the read-only archive from the pipeline's single write.

use std::{
    ffi::OsString,
    io,
    path::{Component, Path, PathBuf},
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum UnsafeOutputError {
    #[display("output file cannot be inside the archive {}: {}", root.display(), output.display())]
    InsideArchive { output: PathBuf, root: PathBuf },
    #[display(
        "output path {} names the archive directory '{}'",
        output.display(),
        dir_name.to_string_lossy()
    )]
    NamesArchiveDir { output: PathBuf, dir_name: OsString },
    #[display("failed to resolve {}", path.display())]
    Resolve { path: PathBuf, source: io::Error },
}

/// Rejects an output path that could overwrite part of the archive.
///
/// The output is rejected when it resolves inside `archive_root` (after
/// making it absolute, folding `.`/`..` and following symlinks of the
/// existing ancestors), or when any component of the path as given equals
/// the archive root's directory name, either as given or as resolved.
pub fn check_output_path(output: &Path, archive_root: &Path) -> Result<(), UnsafeOutputError> {
    let root = resolve(archive_root)?;

    let dir_names = [archive_root.file_name(), root.file_name()];
    for dir_name in dir_names.into_iter().flatten() {
        let names_archive = output
            .components()
            .any(|c| matches!(c, Component::Normal(name) if name == dir_name));
        if names_archive {
            return Err(UnsafeOutputError::NamesArchiveDir {
                output: output.to_owned(),
                dir_name: dir_name.to_owned(),
            });
        }
    }

    let resolved = resolve(output)?;
    if resolved.starts_with(&root) {
        return Err(UnsafeOutputError::InsideArchive {
            output: output.to_owned(),
            root,
        });
    }
    Ok(())
}

/// Absolute, `..`-free form of `path` with the existing prefix canonicalized.
fn resolve(path: &Path) -> Result<PathBuf, UnsafeOutputError> {
    let absolute = std::path::absolute(path).map_err(|source| UnsafeOutputError::Resolve {
        path: path.to_owned(),
        source,
    })?;
    let normalized = normalize_lexically(&absolute);

    for ancestor in normalized.ancestors() {
        if let Ok(canonical) = ancestor.canonicalize() {
            let rest = normalized.strip_prefix(ancestor).unwrap_or(Path::new(""));
            return Ok(normalize_lexically(&canonical.join(rest)));
        }
    }
    Ok(normalized)
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn archive() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("logs");
        fs::create_dir_all(root.join("2025-10/gen1ou")).unwrap();
        (dir, root)
    }

    #[test]
    fn test_output_outside_archive_is_allowed() {
        let (dir, root) = archive();
        let output = dir.path().join("analysis/data.json");
        check_output_path(&output, &root).unwrap();
    }

    #[test]
    fn test_output_inside_archive_is_rejected() {
        let (_dir, root) = archive();
        let err = check_output_path(&root.join("2025-10/out.json"), &root).unwrap_err();
        assert!(matches!(err, UnsafeOutputError::NamesArchiveDir { .. }));
    }

    #[test]
    fn test_dotdot_into_archive_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("battle-archive");
        fs::create_dir_all(root.join("2025-10")).unwrap();
        let sneaky = dir.path().join("elsewhere/../battle-archive/2025-10/../out.json");
        let err = check_output_path(&sneaky, &root).unwrap_err();
        assert!(matches!(err, UnsafeOutputError::NamesArchiveDir { .. }));

        check_output_path(&dir.path().join("out/../data.json"), &root).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_into_archive_is_rejected() {
        let (dir, root) = archive();
        let link = dir.path().join("shortcut");
        std::os::unix::fs::symlink(&root, &link).unwrap();
        let err = check_output_path(&link.join("out.json"), &root).unwrap_err();
        assert!(matches!(err, UnsafeOutputError::InsideArchive { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_root_rejects_both_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("battle-store");
        fs::create_dir_all(&store).unwrap();
        let root = dir.path().join("logs");
        std::os::unix::fs::symlink(&store, &root).unwrap();

        for output in ["backup/logs/x.json", "backup/battle-store/x.json"] {
            let err = check_output_path(&dir.path().join(output), &root).unwrap_err();
            assert!(matches!(err, UnsafeOutputError::NamesArchiveDir { .. }), "{output}");
        }
        check_output_path(&dir.path().join("backup/x.json"), &root).unwrap();
    }

    #[test]
    fn test_relative_archive_name_component_is_rejected() {
        let (_dir, root) = archive();
        let err = check_output_path(Path::new("backup/logs/data.json"), &root).unwrap_err();
        assert!(matches!(err, UnsafeOutputError::NamesArchiveDir { .. }));
    }
}
