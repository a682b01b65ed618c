//! Geometry normalization
//!
//! Produces one canonical WGS 84 coordinate per record for a given
//! point-selection method. Records that cannot be resolved are left out of
//! the table; they are never given partial or synthesized coordinates.

use std::collections::HashMap;

use wisata_core::models::place::{CanonicalPoint, PlaceRecord, PointMethod, PointSource};
use wisata_geo::anchor::anchor_point;
use wisata_geo::transform::to_wgs84_lenient;

/// Canonical points keyed by record id. Absence means the record failed
/// normalization and is excluded from ranking.
pub type CoordinateTable = HashMap<u64, CanonicalPoint>;

/// Normalize an ordered batch of records into a coordinate table.
///
/// Explicit x/y attributes win verbatim, regardless of method. Shape-derived
/// points go through lenient CRS normalization first; per-record failures are
/// logged and skipped, never fatal.
pub fn normalize_records(
    records: &[PlaceRecord],
    crs: u32,
    method: PointMethod,
) -> CoordinateTable {
    let mut table = CoordinateTable::with_capacity(records.len());

    for record in records {
        if let Some([x, y]) = record.xy {
            table.insert(record.id, CanonicalPoint::new(y, x, PointSource::ExplicitXy));
            continue;
        }

        let geometry = match &record.geometry {
            Some(geometry) => geometry,
            None => {
                tracing::debug!(id = record.id, "Record has neither x/y nor geometry; skipped");
                continue;
            }
        };

        let wgs84 = to_wgs84_lenient(geometry, Some(crs));
        match anchor_point(&wgs84, method) {
            Some((point, source)) => {
                table.insert(record.id, CanonicalPoint::new(point.y(), point.x(), source));
            }
            None => {
                tracing::debug!(
                    id = record.id,
                    method = %method,
                    "No anchor point derivable from geometry; skipped"
                );
            }
        }
    }

    table
}
