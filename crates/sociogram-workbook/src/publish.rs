use std::io::Write;
use std::path::Path;

use sociogram_error::{Error, Result};
use tempfile::Builder;
use tracing::debug;

/// Write `bytes` to `target` so readers see either the old file or the
/// complete new one.
///
/// The data goes to a temporary file in the target directory first and is
/// renamed over `target` once flushed. The temporary file is removed if any
/// step fails.
pub fn publish_atomically(bytes: &[u8], target: &Path) -> Result<()> {
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = Builder::new()
        .prefix(".sociogram-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| {
            Error::from(e)
                .with_operation("publish::publish_atomically")
                .with_context("dir", dir.display().to_string())
        })?;

    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    tmp.persist(target).map_err(|e| {
        Error::from(e.error)
            .with_operation("publish::publish_atomically")
            .with_context("path", target.display().to_string())
    })?;

    debug!(path = %target.display(), bytes = bytes.len(), "published");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.xlsx");
        std::fs::write(&target, b"old").unwrap();

        publish_atomically(b"new contents", &target).unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"new contents");

        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("absent").join("out.xlsx");
        assert!(publish_atomically(b"x", &target).is_err());
        assert!(!target.exists());
    }
}
