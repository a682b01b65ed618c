use anyhow::Result;

use wisata_core::models::place::PointMethod;
use wisata_retrieval::NearestPipeline;

use crate::output::OutputWriter;

pub fn execute(pipeline: &NearestPipeline, output: &OutputWriter) -> Result<()> {
    let directory = pipeline.directory();

    if output.is_json() {
        return output.result(serde_json::json!({
            "source": directory.source(),
            "rows": directory.len(),
            "crs": directory.crs(),
            "name_column": directory.name_column(),
            "bbox_wgs84": directory.bbox(),
            "has_geometry": directory.has_geometry(),
            "columns": directory.columns(),
            "resolved": {
                "representative": directory.table(PointMethod::Representative).len(),
                "centroid": directory.table(PointMethod::Centroid).len(),
            },
        }));
    }

    let source = directory.source();
    output.section("Dataset");
    output.kv("Source", source.path.display());
    output.kv("Size (bytes)", source.size_bytes);
    if let Some(modified) = source.modified {
        output.kv("Modified", modified.to_rfc3339());
    }
    output.kv("Rows", directory.len());
    output.kv("CRS", format!("EPSG:{}", directory.crs()));
    output.kv("Name column", directory.name_column().unwrap_or("(none)"));

    let [min_x, min_y, max_x, max_y] = directory.bbox();
    output.kv(
        "BBox (WGS 84)",
        format!("[{:.4}, {:.4}, {:.4}, {:.4}]", min_x, min_y, max_x, max_y),
    );
    output.kv("Columns", directory.columns().join(", "));

    output.section("Resolved coordinates");
    output.kv("Representative", directory.table(PointMethod::Representative).len());
    output.kv("Centroid", directory.table(PointMethod::Centroid).len());
    Ok(())
}
