//! GeoJSON dataset loader

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::{Result, WisataError};
use crate::formats::LoadedDataset;
use crate::models::geometry::{Geometry, WGS84_EPSG};
use crate::models::place::PlaceRecord;

/// GeoJSON dataset loader
pub struct GeoJsonLoader;

impl GeoJsonLoader {
    /// Read a GeoJSON file into place records.
    ///
    /// Property keys are trimmed of surrounding whitespace; case-insensitive
    /// `x`/`y` properties are normalized to lowercase and surfaced as the
    /// record's explicit coordinate pair.
    pub fn load(path: &Path) -> Result<LoadedDataset> {
        if !path.exists() {
            return Err(WisataError::DatasetNotFound { path: path.to_path_buf() });
        }

        let meta = fs::metadata(path)?;
        let modified: Option<DateTime<Utc>> = meta.modified().ok().map(DateTime::from);

        let content = fs::read_to_string(path)?;

        let geojson: geojson::GeoJson =
            content.parse().map_err(|e| WisataError::InvalidDataset {
                reason: format!("Failed to parse GeoJSON: {}", e),
            })?;

        let (records, crs) = extract_records_and_crs(&geojson)?;

        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("unnamed").to_string();

        tracing::info!(
            path = %path.display(),
            rows = records.len(),
            crs = crs,
            "Loaded GeoJSON dataset"
        );

        Ok(LoadedDataset {
            name,
            path: path.to_path_buf(),
            crs,
            records,
            size_bytes: meta.len(),
            modified,
        })
    }
}

/// Extract records and CRS from parsed GeoJSON
fn extract_records_and_crs(geojson: &geojson::GeoJson) -> Result<(Vec<PlaceRecord>, u32)> {
    match geojson {
        geojson::GeoJson::FeatureCollection(fc) => {
            let records = fc
                .features
                .iter()
                .enumerate()
                .map(|(idx, feature)| convert_record(feature, idx as u64))
                .collect();

            // Extract CRS (default to WGS84 if not specified)
            let crs = fc
                .foreign_members
                .as_ref()
                .and_then(|fm| fm.get("crs"))
                .and_then(extract_epsg_from_crs)
                .unwrap_or(WGS84_EPSG);

            Ok((records, crs))
        }
        geojson::GeoJson::Feature(feature) => {
            Ok((vec![convert_record(feature, 0)], WGS84_EPSG))
        }
        geojson::GeoJson::Geometry(geom) => {
            // Bare geometry: wrap into a single attribute-less record
            let value = serde_json::to_value(geom).map_err(|e| {
                WisataError::Serialization(format!("Failed to serialize geometry: {}", e))
            })?;
            let record = PlaceRecord::new(0, Geometry::from_geojson(&value), None, HashMap::new());
            Ok((vec![record], WGS84_EPSG))
        }
    }
}

/// Convert a GeoJSON feature to a PlaceRecord
fn convert_record(feature: &geojson::Feature, id: u64) -> PlaceRecord {
    let geometry = feature
        .geometry
        .as_ref()
        .and_then(|geom| serde_json::to_value(geom).ok())
        .as_ref()
        .and_then(Geometry::from_geojson);

    // Trim property keys; the source files carry stray whitespace in headers.
    let mut attributes: HashMap<String, serde_json::Value> = feature
        .properties
        .as_ref()
        .map(|props| props.iter().map(|(k, v)| (k.trim().to_string(), v.clone())).collect())
        .unwrap_or_default();

    let xy = extract_explicit_xy(&mut attributes);

    PlaceRecord::new(id, geometry, xy, attributes)
}

/// Detect case-insensitive `x`/`y` properties; when both carry numbers,
/// normalize the keys to lowercase and return the (lon, lat) pair.
fn extract_explicit_xy(attributes: &mut HashMap<String, serde_json::Value>) -> Option<[f64; 2]> {
    let x_key = attributes.keys().find(|k| k.eq_ignore_ascii_case("x"))?.clone();
    let y_key = attributes.keys().find(|k| k.eq_ignore_ascii_case("y"))?.clone();

    for (found, canonical) in [(&x_key, "x"), (&y_key, "y")] {
        if found != canonical {
            if let Some(v) = attributes.remove(found) {
                attributes.insert(canonical.to_string(), v);
            }
        }
    }

    let x = value_as_f64(attributes.get("x")?)?;
    let y = value_as_f64(attributes.get("y")?)?;
    Some([x, y])
}

fn value_as_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Extract EPSG code from a GeoJSON CRS object
fn extract_epsg_from_crs(crs: &serde_json::Value) -> Option<u32> {
    // Parse "EPSG:4326" or "urn:ogc:def:crs:EPSG::4326"
    let name = crs.get("properties")?.get("name")?.as_str()?;
    name.split(':').next_back()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_dataset(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.geojson");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_feature_collection_with_crs() {
        let (_dir, path) = write_dataset(
            r#"{
            "type": "FeatureCollection",
            "crs": {"type": "name", "properties": {"name": "EPSG:3857"}},
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [110.0, -7.5]},
                    "properties": {"nama_objek": "Candi Sambisari"}
                }
            ]
        }"#,
        );

        let dataset = GeoJsonLoader::load(&path).unwrap();
        assert_eq!(dataset.name, "test");
        assert_eq!(dataset.crs, 3857);
        assert_eq!(dataset.records.len(), 1);
        assert!(dataset.records[0].has_geometry());
        assert_eq!(dataset.records[0].name(None).as_deref(), Some("Candi Sambisari"));
    }

    #[test]
    fn test_missing_crs_defaults_to_wgs84() {
        let (_dir, path) = write_dataset(
            r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [110.0, -7.5]},
                    "properties": {}
                }
            ]
        }"#,
        );

        let dataset = GeoJsonLoader::load(&path).unwrap();
        assert_eq!(dataset.crs, 4326);
    }

    #[test]
    fn test_explicit_xy_extraction_and_key_normalization() {
        let (_dir, path) = write_dataset(
            r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": null,
                    "properties": {"X": 110.36, "Y": -7.79, "nama_objek": "Tugu"}
                }
            ]
        }"#,
        );

        let dataset = GeoJsonLoader::load(&path).unwrap();
        let record = &dataset.records[0];
        assert_eq!(record.xy, Some([110.36, -7.79]));
        // Keys are renamed, values still pass through.
        assert!(record.attributes.contains_key("x"));
        assert!(record.attributes.contains_key("y"));
        assert!(!record.attributes.contains_key("X"));
    }

    #[test]
    fn test_property_keys_are_trimmed() {
        let (_dir, path) = write_dataset(
            r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [110.0, -7.5]},
                    "properties": {" nama_objek ": "Alun-Alun"}
                }
            ]
        }"#,
        );

        let dataset = GeoJsonLoader::load(&path).unwrap();
        assert_eq!(dataset.records[0].name(None).as_deref(), Some("Alun-Alun"));
    }

    #[test]
    fn test_non_numeric_xy_is_ignored() {
        let (_dir, path) = write_dataset(
            r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": null,
                    "properties": {"x": "not a number", "y": -7.79}
                }
            ]
        }"#,
        );

        let dataset = GeoJsonLoader::load(&path).unwrap();
        assert_eq!(dataset.records[0].xy, None);
    }

    #[test]
    fn test_missing_file() {
        let result = GeoJsonLoader::load(Path::new("/nonexistent/data.geojson"));
        assert!(matches!(result, Err(WisataError::DatasetNotFound { .. })));
    }

    #[test]
    fn test_invalid_geojson() {
        let (_dir, path) = write_dataset("not valid json");
        let result = GeoJsonLoader::load(&path);
        assert!(matches!(result, Err(WisataError::InvalidDataset { .. })));
    }
}
