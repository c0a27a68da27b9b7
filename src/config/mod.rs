#![allow(dead_code)]
use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::bbox::Bbox;
use crate::mosaic::BuildOptions;

pub mod error;
pub use error::ConfigError;

/// Standard SRTM3 grid side length: one arc-second spacing with both borders
/// included, 1200 intervals per degree.
pub const DEFAULT_TILE_SIZE: usize = 1201;

#[derive(Debug, Clone)]
pub struct Config {
    data_dir: PathBuf,
    output_dir: PathBuf,
    zones: Vec<String>,
    tile_size: usize,
    fill_voids: bool,
    fill_value: Option<i16>,
    bbox: Option<Bbox>,
}

// Deserializes a Config, validating the tile size, the void-fill knobs and
// the optional bounding box before handing the value out.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ConfigHelper {
            data_dir: String,
            output_dir: String,
            #[serde(default)]
            zones: Vec<String>,
            tile_size: Option<usize>,
            #[serde(default)]
            fill_voids: bool,
            fill_value: Option<i16>,
            bbox: Option<BboxHelper>,
        }

        #[derive(Deserialize)]
        struct BboxHelper {
            xmin: f64,
            xmax: f64,
            ymin: f64,
            ymax: f64,
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        let tile_size = helper.tile_size.unwrap_or(DEFAULT_TILE_SIZE);
        if tile_size < 2 {
            return Err(D::Error::custom(ConfigError::TileSize(tile_size)));
        }

        // A fill value without filling enabled is a config mistake, not a
        // silently ignored field
        if helper.fill_value.is_some() && !helper.fill_voids {
            return Err(D::Error::custom(ConfigError::FillValue));
        }

        let bbox = if let Some(bbox_helper) = helper.bbox {
            Some(
                Bbox::new(
                    bbox_helper.xmin,
                    bbox_helper.xmax,
                    bbox_helper.ymin,
                    bbox_helper.ymax,
                )
                .map_err(|e| D::Error::custom(ConfigError::Bbox(e)))?,
            )
        } else {
            None
        };

        Ok(Config {
            data_dir: PathBuf::from(helper.data_dir),
            output_dir: PathBuf::from(helper.output_dir),
            zones: helper.zones,
            tile_size,
            fill_voids: helper.fill_voids,
            fill_value: helper.fill_value,
            bbox,
        })
    }
}

impl Config {
    pub fn new(data_dir: PathBuf, output_dir: PathBuf, zones: Vec<String>) -> Self {
        Self {
            data_dir,
            output_dir,
            zones,
            tile_size: DEFAULT_TILE_SIZE,
            fill_voids: false,
            fill_value: None,
            bbox: None,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn zones(&self) -> &[String] {
        &self.zones
    }

    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            fill_voids: self.fill_voids,
            fill_value: self.fill_value,
            bbox: self.bbox.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.json");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, file_path)
    }

    #[test]
    fn test_from_file() {
        let (_dir, file_path) = write_config(
            r#"
    {
        "data_dir": "./data",
        "output_dir": "./outputs/dem",
        "zones": ["A17", "SA17"],
        "tile_size": 1201
    }
    "#,
        );

        let config = Config::from_file(file_path).unwrap();

        assert_eq!(config.data_dir(), Path::new("./data"));
        assert_eq!(config.output_dir(), Path::new("./outputs/dem"));
        assert_eq!(config.zones(), &["A17".to_string(), "SA17".to_string()]);
        assert_eq!(config.tile_size(), 1201);
        assert!(!config.build_options().fill_voids);
    }

    #[test]
    fn test_defaults_apply() {
        let (_dir, file_path) = write_config(
            r#"{ "data_dir": "./data", "output_dir": "./out" }"#,
        );

        let config = Config::from_file(file_path).unwrap();
        assert_eq!(config.tile_size(), DEFAULT_TILE_SIZE);
        assert!(config.zones().is_empty());
        assert!(config.build_options().bbox.is_none());
    }

    #[test]
    fn test_tile_size_below_two_is_rejected() {
        let (_dir, file_path) = write_config(
            r#"{ "data_dir": "./data", "output_dir": "./out", "tile_size": 1 }"#,
        );

        assert!(matches!(
            Config::from_file(file_path),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_fill_value_without_fill_voids_is_rejected() {
        let (_dir, file_path) = write_config(
            r#"{ "data_dir": "./data", "output_dir": "./out", "fill_value": 0 }"#,
        );

        assert!(Config::from_file(file_path).is_err());
    }

    #[test]
    fn test_bad_bbox_is_rejected() {
        let (_dir, file_path) = write_config(
            r#"
    {
        "data_dir": "./data",
        "output_dir": "./out",
        "bbox": { "xmin": -200.0, "xmax": 0.0, "ymin": 0.0, "ymax": 1.0 }
    }
    "#,
        );

        assert!(Config::from_file(file_path).is_err());
    }

    #[test]
    fn test_fill_options_pass_through() {
        let (_dir, file_path) = write_config(
            r#"
    {
        "data_dir": "./data",
        "output_dir": "./out",
        "fill_voids": true,
        "fill_value": -7
    }
    "#,
        );

        let opts = Config::from_file(file_path).unwrap().build_options();
        assert!(opts.fill_voids);
        assert_eq!(opts.fill_value, Some(-7));
    }
}
