pub mod list;
pub mod names;
pub mod nearest;
pub mod status;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use wisata_core::config::{CliConfigOverrides, LayeredConfig};
use wisata_core::formats::geojson::GeoJsonLoader;
use wisata_retrieval::{NearestPipeline, PlaceDirectory};

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;

pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    let mut config = LayeredConfig::with_defaults();
    if Path::new("wisata.toml").exists() {
        config = config.load_from_file("wisata.toml")?;
    }
    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        data_path: cli.data.clone(),
        ..Default::default()
    });

    let dataset = GeoJsonLoader::load(&config.data_path.value).with_context(|| {
        format!("Failed to load dataset {}", config.data_path.value.display())
    })?;
    let directory = Arc::new(
        PlaceDirectory::from_dataset(dataset).context("Dataset cannot serve queries")?,
    );
    let pipeline = NearestPipeline::new(directory);

    match cli.command {
        Commands::Nearest(args) => nearest::execute(args, &pipeline, &output),
        Commands::Names => names::execute(&pipeline, &output),
        Commands::List(args) => list::execute(args, &pipeline, &output),
        Commands::Status => status::execute(&pipeline, &output),
    }
}
