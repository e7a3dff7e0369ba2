use std::env;
use std::io;

use log::info;
use structured_logger::json::new_writer;
use structured_logger::Builder;

use osm_shape::config::{create_output_dir, load_user_config, DEFAULT_CONFIG_PATH};
use osm_shape::errors::Result;
use osm_shape::etl::shape_osm::ShapeOsmEtl;
use osm_shape::etl::Etl;

const DEFAULT_LOG_LEVEL: &str = "info";

fn setup_logging() {
    let level = env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    Builder::with_level(&level)
        .with_target_writer("*", new_writer(io::stdout()))
        .init();
}

fn main() -> Result<()> {
    setup_logging();

    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let user_config = load_user_config(&config_path)?;
    let output_dir = create_output_dir(&user_config)?;
    let mut etl = ShapeOsmEtl::new(&user_config);
    if let Some(report) = etl.process(&output_dir)? {
        let output_path = etl.output_path(&output_dir)?.display().to_string();
        info!(
            records = report.records.len(),
            failed = report.failed,
            output = output_path.as_str();
            "Wrote shaped records"
        );
    }

    Ok(())
}
