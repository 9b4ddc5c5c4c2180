//! Filesystem utilities.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file atomically, creating parent directories if needed.
///
/// The contents go to a temporary file next to `path` which then replaces
/// it, so readers never observe a partially written file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut file = NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create temporary file in {}", parent.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    file.persist(path)
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build/plugin-yml/plugin.yml");

        write_atomic(&path, "name: Test\n").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "name: Test\n");
    }

    #[test]
    fn test_write_atomic_replaces() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("plugin.yml");

        write_atomic(&path, "old").unwrap();
        write_atomic(&path, "new").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "new");

        // only the destination remains
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_read_missing_file_mentions_path() {
        let tmp = TempDir::new().unwrap();
        let err = read_to_string(&tmp.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }
}
