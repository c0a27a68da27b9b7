use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Bbox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Bbox {
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self, String> {
        if !(-180.0..=180.0).contains(&xmin) || !(-180.0..=180.0).contains(&xmax) {
            return Err("Longitude values must be between -180 and 180".to_string());
        }

        if !(-90.0..=90.0).contains(&ymin) || !(-90.0..=90.0).contains(&ymax) {
            return Err("Latitude values must be between -90 and 90".to_string());
        }

        if xmin > xmax || ymin > ymax {
            return Err("Min values must be <= max values".to_string());
        }

        Ok(Bbox {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// Pixel window this box covers on a north-up raster, clamped to the
    /// raster's dimensions. Returns (row, col, rows, cols), or None when the
    /// box misses the raster entirely.
    ///
    /// geotransform: [west, pixel_width, 0, north, 0, -pixel_height]
    pub fn pixel_window(
        &self,
        transform: &[f64; 6],
        width: usize,
        height: usize,
    ) -> Option<(usize, usize, usize, usize)> {
        let col_min = ((self.xmin - transform[0]) / transform[1]).floor() as i64;
        let col_max = ((self.xmax - transform[0]) / transform[1]).ceil() as i64;
        let row_min = ((self.ymax - transform[3]) / transform[5]).floor() as i64;
        let row_max = ((self.ymin - transform[3]) / transform[5]).ceil() as i64;

        let col0 = col_min.max(0) as usize;
        let col1 = (col_max.max(0) as usize).min(width);
        let row0 = row_min.max(0) as usize;
        let row1 = (row_max.max(0) as usize).min(height);

        if col0 >= col1 || row0 >= row1 {
            return None;
        }

        Some((row0, col0, row1 - row0, col1 - col0))
    }
}
