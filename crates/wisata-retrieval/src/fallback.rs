//! Widen-on-empty retry policy
//!
//! One front-end variant historically retried an emptied radius query with
//! an unbounded, widened top-30. That behavior belongs to the caller, not
//! the ranker, so it lives here as a wrapper around the pipeline; the other
//! front-ends surface the emptiness as-is.

use wisata_core::error::{Result, WisataError};

use crate::models::{NearestQuery, PlaceItem};
use crate::pipeline::NearestPipeline;

/// Result limit used when the radius constraint is dropped.
pub const WIDENED_LIMIT: usize = 30;

/// A nearest-query result that may have come from the widened retry.
#[derive(Debug, Clone)]
pub struct WidenedResult {
    pub places: Vec<PlaceItem>,
    /// True when the radius emptied the set and the unbounded retry ran.
    pub widened: bool,
}

/// Execute a query; on `EmptyAfterRadius`, retry without the radius
/// constraint and a widened top-30. `EmptyAfterFilter` is never retried:
/// a name that matches nothing stays an error.
pub fn nearest_or_widen(pipeline: &NearestPipeline, query: &NearestQuery) -> Result<WidenedResult> {
    match pipeline.execute(query) {
        Ok(places) => Ok(WidenedResult { places, widened: false }),
        Err(WisataError::EmptyAfterRadius { radius_km }) => {
            tracing::info!(
                radius_km = ?radius_km,
                "Nothing within radius; retrying unconstrained with top-{}",
                WIDENED_LIMIT
            );
            let mut widened = query.clone();
            widened.radius_km = None;
            widened.k = WIDENED_LIMIT;

            let places = pipeline.execute(&widened)?;
            Ok(WidenedResult { places, widened: true })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Arc;
    use wisata_core::formats::LoadedDataset;
    use wisata_core::models::place::PlaceRecord;
    use wisata_core::models::Geometry;

    use crate::directory::PlaceDirectory;

    fn pipeline(records: Vec<PlaceRecord>) -> NearestPipeline {
        let dataset = LoadedDataset {
            name: "test".to_string(),
            path: PathBuf::from("test.geojson"),
            crs: 4326,
            records,
            size_bytes: 0,
            modified: None,
        };
        NearestPipeline::new(Arc::new(PlaceDirectory::from_dataset(dataset).unwrap()))
    }

    fn named_point(id: u64, name: &str, lon: f64, lat: f64) -> PlaceRecord {
        let mut attributes = HashMap::new();
        attributes.insert("nama_objek".to_string(), serde_json::json!(name));
        PlaceRecord::new(id, Some(Geometry::point(lon, lat)), None, attributes)
    }

    #[test]
    fn test_no_widening_when_radius_matches() {
        let pipeline = pipeline(vec![named_point(0, "Near", 110.37, -7.79)]);
        let query = NearestQuery::new(-7.7956, 110.3695).with_radius_km(10.0);

        let result = nearest_or_widen(&pipeline, &query).unwrap();
        assert!(!result.widened);
        assert_eq!(result.places.len(), 1);
    }

    #[test]
    fn test_widens_when_radius_empties() {
        // Nearest point is roughly 5 km out; a 1 km radius finds nothing.
        let pipeline = pipeline(vec![named_point(0, "Far", 110.4145, -7.7956)]);
        let query = NearestQuery::new(-7.7956, 110.3695).with_radius_km(1.0);

        let result = nearest_or_widen(&pipeline, &query).unwrap();
        assert!(result.widened);
        assert_eq!(result.places.len(), 1);
        assert!(result.places[0].distance_km.unwrap() > 1.0);
    }

    #[test]
    fn test_widened_retry_is_capped_at_thirty() {
        let records = (0..40)
            .map(|i| named_point(i, &format!("Objek {}", i), 115.0 + i as f64 * 0.01, -8.0))
            .collect();
        let pipeline = pipeline(records);
        let query = NearestQuery::new(-7.7956, 110.3695).with_k(3).with_radius_km(0.5);

        let result = nearest_or_widen(&pipeline, &query).unwrap();
        assert!(result.widened);
        assert_eq!(result.places.len(), WIDENED_LIMIT);
    }

    #[test]
    fn test_empty_after_filter_is_not_retried() {
        let pipeline = pipeline(vec![named_point(0, "Near", 110.37, -7.79)]);
        let query =
            NearestQuery::new(-7.7956, 110.3695).with_name("No Such Place").with_radius_km(1.0);

        assert!(matches!(
            nearest_or_widen(&pipeline, &query),
            Err(WisataError::EmptyAfterFilter { .. })
        ));
    }
}
