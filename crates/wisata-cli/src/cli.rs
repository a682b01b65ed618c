use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wisata - nearest tourist-site recommendations
#[derive(Parser, Debug)]
#[command(name = "wisata")]
#[command(about = "Nearest tourist-site recommendations over a GeoJSON dataset", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the GeoJSON dataset (overrides config and WISATA_DATA)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank the nearest sites from a coordinate
    Nearest(NearestArgs),

    /// List the unique site names in the dataset
    Names,

    /// List sites, optionally filtered by exact name
    List(ListArgs),

    /// Show dataset summary information
    Status,
}

#[derive(Parser, Debug)]
pub struct NearestArgs {
    /// User latitude
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// User longitude
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Number of recommendations (top-K)
    #[arg(short, long, default_value = "3")]
    pub k: usize,

    /// Exact name filter (case-insensitive; "all" disables it)
    #[arg(long)]
    pub name: Option<String>,

    /// Keep only sites within this radius in km
    #[arg(long)]
    pub radius_km: Option<f64>,

    /// Point method for shape-derived coordinates (representative or centroid)
    #[arg(long, default_value = "representative")]
    pub method: String,

    /// When the radius leaves nothing, retry unconstrained with a top-30
    #[arg(long)]
    pub widen: bool,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Exact name filter (case-insensitive; "all" disables it)
    #[arg(long)]
    pub name: Option<String>,

    /// Page size
    #[arg(long, default_value = "100")]
    pub limit: usize,

    /// Page offset
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Point method for shape-derived coordinates (representative or centroid)
    #[arg(long, default_value = "representative")]
    pub method: String,
}
