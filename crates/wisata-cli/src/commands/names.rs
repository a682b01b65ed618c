use anyhow::Result;
use tabled::Tabled;

use wisata_retrieval::NearestPipeline;

use crate::output::OutputWriter;

#[derive(Tabled)]
struct NameRow {
    #[tabled(rename = "Name")]
    name: String,
}

pub fn execute(pipeline: &NearestPipeline, output: &OutputWriter) -> Result<()> {
    let names = pipeline.directory().unique_names();

    if output.is_json() {
        return output.result(&names);
    }

    if names.is_empty() {
        output.info("No name attribute in this dataset.");
        return Ok(());
    }

    output.kv("Unique names", names.len());
    output.table(names.into_iter().map(|name| NameRow { name }).collect());
    Ok(())
}
