use crate::error::{ProcessingError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Read-only memory-mapped view of a measurements file.
///
/// Workers share the mapping by reference; nothing ever writes through it.
#[derive(Debug)]
pub struct MeasurementFile {
    path: PathBuf,
    mmap: Option<Mmap>,
}

impl MeasurementFile {
    pub fn open(path: &Path) -> Result<Self> {
        let input_error = |source| ProcessingError::InputIo {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(input_error)?;
        let len = file.metadata().map_err(input_error)?.len();

        // Zero-length files cannot be mapped on every platform
        let mmap = if len == 0 {
            None
        } else {
            Some(unsafe { Mmap::map(&file) }.map_err(input_error)?)
        };

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.as_bytes().len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_maps_file_contents() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "Hamburg;12.0\n")?;

        let file = MeasurementFile::open(temp_file.path())?;
        assert_eq!(file.as_bytes(), b"Hamburg;12.0\n");
        assert_eq!(file.len(), 13);
        assert_eq!(file.path(), temp_file.path());
        Ok(())
    }

    #[test]
    fn test_empty_file() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        let file = MeasurementFile::open(temp_file.path())?;
        assert!(file.is_empty());
        assert_eq!(file.as_bytes(), b"");
        Ok(())
    }

    #[test]
    fn test_missing_file_is_input_error() {
        let err = MeasurementFile::open(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, ProcessingError::InputIo { .. }));
    }
}
