use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use walkdir::WalkDir;

use crate::config::Config;
use crate::inspect;
use crate::mosaic;

/// Result of one zone build. The driver pattern-matches on this instead of
/// catching propagated errors, so a bad zone never stops the run.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ZoneOutcome {
    Built { zone: String, path: PathBuf },
    Failed { zone: String, reason: String },
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    started_at: String,
    finished_at: String,
    outcomes: Vec<ZoneOutcome>,
}

impl RunReport {
    pub fn outcomes(&self) -> &[ZoneOutcome] {
        &self.outcomes
    }

    pub fn built_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ZoneOutcome::Built { .. }))
            .count()
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

/// Subdirectories of the data root, sorted by name. Used when the config
/// names no zones explicitly.
pub fn discover_zones(data_dir: &Path) -> Vec<String> {
    let mut zones: Vec<String> = WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    zones.sort();
    zones
}

/// Builds every zone in turn, strictly sequentially. One zone's failure is
/// logged and recorded, then the run moves on; this is the only recovery
/// boundary in the pipeline.
pub fn run_zones(config: &Config) -> RunReport {
    let started_at = Local::now().to_rfc3339();

    let zones = if config.zones().is_empty() {
        let found = discover_zones(config.data_dir());
        println!(
            "Discovered {} zone directories under {}",
            found.len(),
            config.data_dir().display()
        );
        found
    } else {
        config.zones().to_vec()
    };

    let opts = config.build_options();
    let mut outcomes = Vec::with_capacity(zones.len());

    for zone in &zones {
        let zone_dir = config.data_dir().join(zone);
        let out_tif = config.output_dir().join(format!("{}_full.tif", zone));

        println!("===== Zone {} =====", zone);
        match mosaic::build_zone_mosaic(&zone_dir, &out_tif, config.tile_size(), &opts) {
            Ok(path) => {
                println!("✓ Zone {} written to {}", zone, path.display());
                match inspect::summarize(&path) {
                    Ok(summary) => println!("{}", summary),
                    Err(e) => eprintln!("Could not summarize {}: {}", path.display(), e),
                }
                outcomes.push(ZoneOutcome::Built {
                    zone: zone.clone(),
                    path,
                });
            }
            Err(e) => {
                eprintln!("✗ Zone {} failed: {}", zone, e);
                outcomes.push(ZoneOutcome::Failed {
                    zone: zone.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    RunReport {
        started_at,
        finished_at: Local::now().to_rfc3339(),
        outcomes,
    }
}
