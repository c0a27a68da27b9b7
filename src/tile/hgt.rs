use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::grid::ElevationGrid;

#[derive(Debug)]
pub enum HgtReadError {
    NotFound(PathBuf),
    SizeMismatch {
        path: PathBuf,
        expected_bytes: usize,
        actual_bytes: usize,
    },
    Io(io::Error),
}

impl fmt::Display for HgtReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HgtReadError::NotFound(path) => write!(f, "HGT file not found: {}", path.display()),
            HgtReadError::SizeMismatch {
                path,
                expected_bytes,
                actual_bytes,
            } => write!(
                f,
                "HGT size mismatch for {}: expected {} bytes, got {}",
                path.display(),
                expected_bytes,
                actual_bytes
            ),
            HgtReadError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for HgtReadError {}

impl From<io::Error> for HgtReadError {
    fn from(err: io::Error) -> HgtReadError {
        HgtReadError::Io(err)
    }
}

/// Decodes a raw SRTM tile: `size` x `size` big-endian signed 16-bit samples
/// in row-major order, row 0 at the north edge. Any byte count other than
/// exactly `size * size * 2` is a hard failure, never a partial grid.
pub fn read_hgt(path: &Path, size: usize) -> Result<ElevationGrid, HgtReadError> {
    if !path.exists() {
        return Err(HgtReadError::NotFound(path.to_path_buf()));
    }

    let raw = fs::read(path)?;

    let expected_bytes = size * size * 2;
    if raw.len() != expected_bytes {
        return Err(HgtReadError::SizeMismatch {
            path: path.to_path_buf(),
            expected_bytes,
            actual_bytes: raw.len(),
        });
    }

    let samples: Vec<i16> = raw
        .chunks_exact(2)
        .map(|pair| i16::from_be_bytes([pair[0], pair[1]]))
        .collect();

    Ok(ElevationGrid::new(size, size, samples))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::VOID;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_tile(path: &Path, samples: &[i16]) {
        let mut file = File::create(path).unwrap();
        for sample in samples {
            file.write_all(&sample.to_be_bytes()).unwrap();
        }
    }

    #[test]
    fn test_read_decodes_big_endian_row_major() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("N00E000.hgt");
        write_tile(&path, &[100, -2, VOID, 0, 7, 42, -1, 3, 9]);

        let grid = read_hgt(&path, 3).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(0, 0), 100);
        assert_eq!(grid.get(0, 2), VOID);
        assert_eq!(grid.get(2, 2), 9);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let result = read_hgt(&dir.path().join("N00E000.hgt"), 3);
        assert!(matches!(result, Err(HgtReadError::NotFound(_))));
    }

    #[test]
    fn test_wrong_length_is_size_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("N00E000.hgt");
        // One sample short of 3x3
        write_tile(&path, &[0; 8]);

        match read_hgt(&path, 3) {
            Err(HgtReadError::SizeMismatch {
                expected_bytes,
                actual_bytes,
                ..
            }) => {
                assert_eq!(expected_bytes, 18);
                assert_eq!(actual_bytes, 16);
            }
            other => panic!("expected SizeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_odd_byte_count_is_size_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("N00E000.hgt");
        std::fs::write(&path, [0u8; 19]).unwrap();

        assert!(matches!(
            read_hgt(&path, 3),
            Err(HgtReadError::SizeMismatch { .. })
        ));
    }
}
