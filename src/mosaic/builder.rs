use std::fs;
use std::path::{Path, PathBuf};

use gdal::raster::{Buffer, RasterCreationOptions};
use gdal::spatial_ref::SpatialRef;
use gdal::{Dataset, DriverManager};
use glob::{MatchOptions, glob_with};

use crate::bbox::Bbox;
use crate::grid::{self, ElevationGrid};
use crate::mosaic::error::MosaicError;
use crate::tile::id::TileId;
use crate::tile::{georef, hgt};

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Replace void samples in each tile before merging. Without an explicit
    /// `fill_value` the minimum valid sample of the tile is used, or 0 when
    /// the whole tile is void.
    pub fill_voids: bool,
    pub fill_value: Option<i16>,
    /// Crop the merged mosaic to this box (clamped to the mosaic extent).
    pub bbox: Option<Bbox>,
}

/// Builds one zone: decodes every `.hgt` tile in `zone_dir`, merges them on
/// their shared native grid and writes a compressed, tiled GeoTIFF to
/// `out_tif`. Any tile failure aborts the whole zone; no partial mosaic is
/// written. Per-tile datasets are dropped on every exit path.
pub fn build_zone_mosaic(
    zone_dir: &Path,
    out_tif: &Path,
    size: usize,
    opts: &BuildOptions,
) -> Result<PathBuf, MosaicError> {
    if !zone_dir.is_dir() {
        return Err(MosaicError::ZoneDirNotFound(zone_dir.to_path_buf()));
    }

    let tile_paths = list_tiles(zone_dir)?;
    if tile_paths.is_empty() {
        return Err(MosaicError::NoTiles(zone_dir.to_path_buf()));
    }
    println!(
        "Found {} .hgt tiles in {}",
        tile_paths.len(),
        zone_dir.display()
    );

    let mut datasets = Vec::with_capacity(tile_paths.len());
    for path in &tile_paths {
        let name = path.file_name().and_then(|s| s.to_str()).unwrap_or_default();
        let id = TileId::from_name(name)?;

        let mut tile_grid = hgt::read_hgt(path, size)?;
        if opts.fill_voids {
            tile_grid.fill_voids(opts.fill_value);
        }

        datasets.push(georef::to_mem_dataset(&tile_grid, id).map_err(MosaicError::Georef)?);
    }

    let (mosaic, transform) = merge(&datasets)?;
    let (mosaic, transform) = match &opts.bbox {
        Some(bbox) => crop_to_bbox(mosaic, transform, bbox)?,
        None => (mosaic, transform),
    };

    write_geotiff(out_tif, &mosaic, &transform)?;

    Ok(out_tif.to_path_buf())
}

/// Case-insensitive `*.hgt` listing, sorted by file name.
fn list_tiles(zone_dir: &Path) -> Result<Vec<PathBuf>, MosaicError> {
    let pattern = zone_dir.join("*.hgt");
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut paths: Vec<PathBuf> = glob_with(&pattern.to_string_lossy(), options)?
        .filter_map(|entry| entry.ok())
        .collect();
    paths.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));

    Ok(paths)
}

/// Aligns all tiles onto the union pixel grid at their shared pixel size and
/// pastes them in order, first tile winning where coverage overlaps. Gaps
/// stay at the void sentinel. No resampling: offsets are whole pixels.
fn merge(datasets: &[Dataset]) -> Result<(ElevationGrid, [f64; 6]), MosaicError> {
    let first = datasets
        .first()
        .expect("merge requires at least one dataset");
    let px = first.geo_transform().map_err(MosaicError::Merge)?[1];

    let mut west = f64::INFINITY;
    let mut south = f64::INFINITY;
    let mut east = f64::NEG_INFINITY;
    let mut north = f64::NEG_INFINITY;

    for dataset in datasets {
        let gt = dataset.geo_transform().map_err(MosaicError::Merge)?;
        let (width, height) = dataset.raster_size();

        west = west.min(gt[0]);
        north = north.max(gt[3]);
        east = east.max(gt[0] + width as f64 * px);
        south = south.min(gt[3] - height as f64 * px);
    }

    let out_width = ((east - west) / px).round() as usize;
    let out_height = ((north - south) / px).round() as usize;
    let mut samples = vec![grid::VOID; out_width * out_height];

    for dataset in datasets {
        let gt = dataset.geo_transform().map_err(MosaicError::Merge)?;
        let (width, height) = dataset.raster_size();
        let col_off = ((gt[0] - west) / px).round() as usize;
        let row_off = ((north - gt[3]) / px).round() as usize;

        let band = dataset.rasterband(1).map_err(MosaicError::Merge)?;
        let buffer = band
            .read_as::<i16>((0, 0), (width, height), (width, height), None)
            .map_err(MosaicError::Merge)?;
        let data = buffer.data();

        for row in 0..height {
            for col in 0..width {
                let value = data[row * width + col];
                if value == grid::VOID {
                    continue;
                }
                let out_idx = (row_off + row) * out_width + col_off + col;
                if samples[out_idx] == grid::VOID {
                    samples[out_idx] = value;
                }
            }
        }
    }

    let transform = [west, px, 0.0, north, 0.0, -px];
    Ok((ElevationGrid::new(out_width, out_height, samples), transform))
}

fn crop_to_bbox(
    mosaic: ElevationGrid,
    transform: [f64; 6],
    bbox: &Bbox,
) -> Result<(ElevationGrid, [f64; 6]), MosaicError> {
    let px = transform[1];

    let (row, col, rows, cols) = bbox
        .pixel_window(&transform, mosaic.width(), mosaic.height())
        .ok_or_else(|| {
            MosaicError::Crop("bounding box does not intersect the mosaic".to_string())
        })?;

    let cropped = mosaic
        .crop(row, col, rows, cols)
        .map_err(MosaicError::Crop)?;
    let cropped_transform = [
        transform[0] + col as f64 * px,
        px,
        0.0,
        transform[3] - row as f64 * px,
        0.0,
        -px,
    ];

    Ok((cropped, cropped_transform))
}

/// Single-band i16 GeoTIFF: LZW, 256x256 internal tiles, BigTIFF when the
/// driver deems it safer, WGS84, void sentinel as no-data.
fn write_geotiff(
    path: &Path,
    mosaic: &ElevationGrid,
    transform: &[f64; 6],
) -> Result<(), MosaicError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let driver = DriverManager::get_driver_by_name("GTiff").map_err(MosaicError::Write)?;
    let options = RasterCreationOptions::from_iter([
        "COMPRESS=LZW",
        "TILED=YES",
        "BLOCKXSIZE=256",
        "BLOCKYSIZE=256",
        "BIGTIFF=IF_SAFER",
    ]);

    let mut dataset = driver
        .create_with_band_type_with_options::<i16, _>(
            path,
            mosaic.width(),
            mosaic.height(),
            1,
            &options,
        )
        .map_err(MosaicError::Write)?;

    dataset
        .set_geo_transform(transform)
        .map_err(MosaicError::Write)?;
    let srs = SpatialRef::from_epsg(4326).map_err(MosaicError::Write)?;
    dataset.set_spatial_ref(&srs).map_err(MosaicError::Write)?;

    {
        let mut band = dataset.rasterband(1).map_err(MosaicError::Write)?;
        band.set_no_data_value(Some(grid::VOID as f64))
            .map_err(MosaicError::Write)?;
        let mut buffer = Buffer::new(
            (mosaic.width(), mosaic.height()),
            mosaic.samples().to_vec(),
        );
        band.write((0, 0), (mosaic.width(), mosaic.height()), &mut buffer)
            .map_err(MosaicError::Write)?;
    }

    Ok(())
}
