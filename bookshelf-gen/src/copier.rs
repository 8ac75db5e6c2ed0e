//! Image copy seam.

use std::path::Path;

/// Copies one file. Implementations must be safe to call from several chapter
/// workers at once (destinations never overlap).
pub trait FileCopier: Send + Sync {
    fn copy_file(&self, dst: &Path, src: &Path) -> std::io::Result<()>;
}

/// Plain filesystem copy, creating the destination directory as needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsCopier;

impl FileCopier for FsCopier {
    fn copy_file(&self, dst: &Path, src: &Path) -> std::io::Result<()> {
        if let Some(parent) = dst.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(src, dst)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copies_into_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("keys.png");
        std::fs::write(&src, b"png-bytes").unwrap();
        let dst = tmp.path().join("out").join("maps").join("keys.png");

        FsCopier.copy_file(&dst, &src).unwrap();
        assert_eq!(std::fs::read(&dst).unwrap(), b"png-bytes");
    }

    #[test]
    fn missing_source_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = FsCopier
            .copy_file(&tmp.path().join("dst.png"), &tmp.path().join("nope.png"))
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
