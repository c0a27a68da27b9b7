mod bbox;
mod config;
mod grid;
mod inspect;
mod mosaic;
mod tile;
mod zone;

use std::env;
use std::fs;

use config::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "./data/config/mosaic_config.json".to_string());

    println!("Starting HGT mosaic build, config: {}", config_path);

    let config = Config::from_file(&config_path)?;

    println!("data dir: {}", config.data_dir().display());
    println!("output dir: {}", config.output_dir().display());

    fs::create_dir_all(config.output_dir())?;

    let report = zone::run_zones(&config);

    let report_path = config.output_dir().join("build_report.json");
    report.write(&report_path)?;

    println!(
        "Done: {}/{} zones built, report at {}",
        report.built_count(),
        report.outcomes().len(),
        report_path.display()
    );

    Ok(())
}
