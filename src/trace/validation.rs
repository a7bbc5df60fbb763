//! Checks run on a trace path before parsing starts.

use crate::error::{Result, WaveError};
use std::fs::File;
use std::path::Path;

/// Validate that a path names a readable, non-empty regular file.
///
/// # Error Cases
/// - Path does not exist (`FileNotFound`)
/// - Path is a directory or other non-file (`NotAFile`)
/// - File is empty (`TraceParse`, an empty dump has no header)
/// - File cannot be opened for reading (`FileError`)
pub fn validate_trace_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(WaveError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| WaveError::file_error("Failed to read file metadata", e))?;

    if !metadata.is_file() {
        return Err(WaveError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    if metadata.len() == 0 {
        return Err(WaveError::trace_parse(path, "file is empty"));
    }

    File::open(path).map_err(|e| WaveError::file_error("Cannot open file for reading", e))?;

    Ok(())
}

/// Whether the browser should offer `path` as a trace file.
pub fn is_trace_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("vcd"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content).expect("Failed to write test content");
        file.flush().expect("Failed to flush test file");
        file
    }

    #[test]
    fn test_validate_valid_file() {
        let test_file = create_test_file(b"$timescale 1ps $end\n");
        assert!(validate_trace_path(test_file.path()).is_ok());
    }

    #[test]
    fn test_validate_nonexistent_file() {
        let result = validate_trace_path(Path::new("/this/file/does/not/exist.vcd"));
        assert!(matches!(result, Err(WaveError::FileNotFound { .. })));
    }

    #[test]
    fn test_validate_empty_file() {
        let empty_file = create_test_file(&[]);
        match validate_trace_path(empty_file.path()) {
            Err(WaveError::TraceParse { message, .. }) => assert!(message.contains("empty")),
            other => panic!("Expected TraceParse for empty file, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        assert!(matches!(
            validate_trace_path(temp_dir.path()),
            Err(WaveError::NotAFile { .. })
        ));
    }

    #[test]
    fn test_trace_extension() {
        assert!(is_trace_file(Path::new("sim/dump.vcd")));
        assert!(is_trace_file(Path::new("DUMP.VCD")));
        assert!(!is_trace_file(Path::new("notes.txt")));
        assert!(!is_trace_file(Path::new("vcd")));
    }
}
