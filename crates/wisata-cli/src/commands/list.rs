use anyhow::{Context, Result};
use tabled::Tabled;

use wisata_core::models::place::PointMethod;
use wisata_retrieval::NearestPipeline;

use crate::cli::ListArgs;
use crate::output::OutputWriter;

#[derive(Tabled)]
struct ListRow {
    #[tabled(rename = "Index")]
    index: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Latitude")]
    latitude: String,
    #[tabled(rename = "Longitude")]
    longitude: String,
}

pub fn execute(args: ListArgs, pipeline: &NearestPipeline, output: &OutputWriter) -> Result<()> {
    let method: PointMethod = args.method.parse().context("Invalid --method")?;

    let listing =
        pipeline.directory().list_objects(args.name.as_deref(), args.offset, args.limit, method);

    if output.is_json() {
        return output.result(&listing);
    }

    output.kv("Total", listing.total);
    if listing.items.len() < listing.total {
        output.info(format!(
            "Showing {} of {} (offset {})",
            listing.items.len(),
            listing.total,
            args.offset
        ));
    }

    let rows: Vec<ListRow> = listing
        .items
        .iter()
        .map(|item| ListRow {
            index: item.index,
            name: item.name.clone().unwrap_or_else(|| "(unnamed)".to_string()),
            category: item.category.clone().unwrap_or_default(),
            address: item.address.clone().unwrap_or_default(),
            latitude: item.latitude.map(|v| format!("{:.6}", v)).unwrap_or_default(),
            longitude: item.longitude.map(|v| format!("{:.6}", v)).unwrap_or_default(),
        })
        .collect();
    output.table(rows);
    Ok(())
}
