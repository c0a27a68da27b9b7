use gdal::raster::Buffer;
use gdal::spatial_ref::SpatialRef;
use gdal::{Dataset, DriverManager};

use crate::grid::{self, ElevationGrid};
use crate::tile::id::TileId;

/// Geotransform for a tile anchored at (west = lon, north = lat + 1) with
/// square pixels of 1/(size - 1) degree: [west, px, 0, north, 0, -px].
/// SRTM grids include both borders, so 1201 samples span exactly one degree.
pub fn geo_transform(id: TileId, size: usize) -> [f64; 6] {
    let (lat, lon) = id.sw_corner();
    let px = 1.0 / (size as f64 - 1.0);
    [lon, px, 0.0, lat + 1.0, 0.0, -px]
}

/// Wraps a decoded grid in an in-memory GDAL dataset carrying the tile's
/// geotransform, WGS84 (EPSG:4326) and the void sentinel as no-data. The
/// dataset owns a copy of the samples; dropping it releases the handle.
pub fn to_mem_dataset(grid: &ElevationGrid, id: TileId) -> gdal::errors::Result<Dataset> {
    let (width, height) = (grid.width(), grid.height());

    let driver = DriverManager::get_driver_by_name("MEM")?;
    let mut dataset = driver.create_with_band_type::<i16, _>("", width, height, 1)?;

    dataset.set_geo_transform(&geo_transform(id, height))?;
    dataset.set_spatial_ref(&SpatialRef::from_epsg(4326)?)?;

    {
        let mut band = dataset.rasterband(1)?;
        band.set_no_data_value(Some(grid::VOID as f64))?;
        let mut buffer = Buffer::new((width, height), grid.samples().to_vec());
        band.write((0, 0), (width, height), &mut buffer)?;
    }

    Ok(dataset)
}
