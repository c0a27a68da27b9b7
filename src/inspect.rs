use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tiff::decoder::{Decoder, DecodingResult};

use crate::grid::ElevationGrid;

#[derive(Debug)]
pub enum InspectError {
    /// The mosaic file is not on disk, a data-availability problem rather
    /// than a decoding one.
    Missing(PathBuf),
    Decode(String),
}

impl fmt::Display for InspectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectError::Missing(path) => {
                write!(f, "mosaic not available: {}", path.display())
            }
            InspectError::Decode(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InspectError {}

#[derive(Debug)]
pub struct MosaicSummary {
    pub width: u32,
    pub height: u32,
    pub valid_min: Option<i16>,
    pub valid_max: Option<i16>,
    pub void_cells: usize,
}

/// Reads a produced mosaic back and summarizes it, independently of GDAL.
/// Expects the single-band signed 16-bit layout this crate writes.
pub fn summarize(path: &Path) -> Result<MosaicSummary, InspectError> {
    if !path.exists() {
        return Err(InspectError::Missing(path.to_path_buf()));
    }

    let file = File::open(path)
        .map_err(|e| InspectError::Decode(format!("Failed to open file: {}", e)))?;

    let reader = BufReader::new(file);

    let mut decoder = Decoder::new(reader)
        .map_err(|e| InspectError::Decode(format!("Failed to decode TIFF: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| InspectError::Decode(format!("Failed to get dimensions: {}", e)))?;

    let samples: Vec<i16> = match decoder
        .read_image()
        .map_err(|e| InspectError::Decode(format!("Failed to read image: {}", e)))?
    {
        DecodingResult::I16(data) => data,
        _ => {
            return Err(InspectError::Decode(
                "Unsupported pixel format, expected signed 16-bit".to_string(),
            ));
        }
    };

    let grid = ElevationGrid::new(width as usize, height as usize, samples);

    Ok(MosaicSummary {
        width,
        height,
        valid_min: grid.min_valid(),
        valid_max: grid.max_valid(),
        void_cells: grid.void_cells(),
    })
}

impl fmt::Display for MosaicSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_stat = |v: Option<i16>| match v {
            Some(v) => v.to_string(),
            None => "n/a".to_string(),
        };

        write!(
            f,
            "  Size: {}x{}\n  Min elevation: {} m\n  Max elevation: {} m\n  Void cells: {}",
            self.width,
            self.height,
            fmt_stat(self.valid_min),
            fmt_stat(self.valid_max),
            self.void_cells,
        )
    }
}
