use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::batch::BatchError;

/// Directories that never hold convertible playbooks.
const SKIP_DIRS: &[&str] = &[
    ".git",
    ".tox",
    ".venv",
    "venv",
    "node_modules",
    "collections",
    ".molecule",
];

/// Recursively find `.yml`/`.yaml` files under a directory, skipping hidden
/// and vendor directories. Results are sorted for deterministic batch order.
pub fn discover_yaml_files(root: &Path) -> Result<Vec<PathBuf>, BatchError> {
    if !root.is_dir() {
        return Err(BatchError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        // Keep the root itself even if the user points at a hidden dir.
        entry.depth() == 0 || !is_skippable_dir(entry)
    });

    for entry in walker {
        let entry = entry.map_err(|e| BatchError::Discovery {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;
        if entry.file_type().is_file() && has_yaml_extension(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    debug!("discovered {} YAML files under {}", files.len(), root.display());
    Ok(files)
}

fn is_skippable_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIP_DIRS.contains(&name.as_ref())
}

fn has_yaml_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml") | Some("yaml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_yaml_files_and_skips_vendor_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("roles/web/tasks")).unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::create_dir_all(dir.path().join("collections")).unwrap();

        fs::write(dir.path().join("site.yml"), "---\n").unwrap();
        fs::write(dir.path().join("roles/web/tasks/main.yaml"), "---\n").unwrap();
        fs::write(dir.path().join("README.md"), "docs").unwrap();
        fs::write(dir.path().join(".git/config.yml"), "---\n").unwrap();
        fs::write(dir.path().join("collections/vendored.yml"), "---\n").unwrap();

        let files = discover_yaml_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["roles/web/tasks/main.yaml", "site.yml"]);
    }

    #[test]
    fn non_directory_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = discover_yaml_files(file.path()).unwrap_err();
        assert!(matches!(err, BatchError::NotADirectory { .. }));
    }
}
