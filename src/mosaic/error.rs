use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::tile::hgt::HgtReadError;
use crate::tile::id::TileNameError;

#[derive(Debug)]
pub enum MosaicError {
    ZoneDirNotFound(PathBuf),
    NoTiles(PathBuf),
    TileName(TileNameError),
    TileRead(HgtReadError),
    Georef(gdal::errors::GdalError),
    Merge(gdal::errors::GdalError),
    Crop(String),
    Write(gdal::errors::GdalError),
    Pattern(glob::PatternError),
    Io(io::Error),
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MosaicError::ZoneDirNotFound(path) => {
                write!(f, "zone directory not found: {}", path.display())
            }
            MosaicError::NoTiles(path) => {
                write!(f, "no .hgt tiles in: {}", path.display())
            }
            MosaicError::TileName(e) => write!(f, "{}", e),
            MosaicError::TileRead(e) => write!(f, "{}", e),
            MosaicError::Georef(e) => write!(f, "failed to georeference tile: {}", e),
            MosaicError::Merge(e) => write!(f, "failed to merge tiles: {}", e),
            MosaicError::Crop(e) => write!(f, "failed to crop mosaic: {}", e),
            MosaicError::Write(e) => write!(f, "failed to write mosaic: {}", e),
            MosaicError::Pattern(e) => write!(f, "bad tile listing pattern: {}", e),
            MosaicError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for MosaicError {}

impl From<TileNameError> for MosaicError {
    fn from(err: TileNameError) -> MosaicError {
        MosaicError::TileName(err)
    }
}

impl From<HgtReadError> for MosaicError {
    fn from(err: HgtReadError) -> MosaicError {
        MosaicError::TileRead(err)
    }
}

impl From<glob::PatternError> for MosaicError {
    fn from(err: glob::PatternError) -> MosaicError {
        MosaicError::Pattern(err)
    }
}

impl From<io::Error> for MosaicError {
    fn from(err: io::Error) -> MosaicError {
        MosaicError::Io(err)
    }
}
