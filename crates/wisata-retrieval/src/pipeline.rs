//! Nearest-neighbor ranking
//!
//! A full linear scan over the precomputed coordinate table: filter by name,
//! drop unresolved records, measure geodesic distance, apply the radius
//! cutoff, stable-sort ascending, truncate to k. Every query builds a fresh
//! result list; the shared tables are never touched.

use std::sync::Arc;

use wisata_core::error::{Result, WisataError};
use wisata_core::models::place::is_catch_all;
use wisata_geo::distance::geodesic_km;

use crate::directory::PlaceDirectory;
use crate::models::{NearestQuery, PlaceItem};

/// Ranker over a shared, read-only place directory.
#[derive(Debug, Clone)]
pub struct NearestPipeline {
    directory: Arc<PlaceDirectory>,
}

impl NearestPipeline {
    /// Create a new pipeline over a directory
    pub fn new(directory: Arc<PlaceDirectory>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &PlaceDirectory {
        &self.directory
    }

    /// Execute a nearest query.
    ///
    /// Fails with `EmptyAfterFilter` when the name filter leaves nothing and
    /// with `EmptyAfterRadius` when nothing resolvable remains within reach;
    /// whether to retry unconstrained is the caller's decision.
    pub fn execute(&self, query: &NearestQuery) -> Result<Vec<PlaceItem>> {
        let name_filter =
            query.name.as_deref().filter(|n| !is_catch_all(n));

        let candidates: Vec<_> = self.directory.filter_by_name(query.name.as_deref()).collect();
        if candidates.is_empty() {
            return Err(WisataError::EmptyAfterFilter {
                name: name_filter.map(str::to_string),
            });
        }

        // Records without a canonical point are dropped here, silently.
        let mut scored: Vec<(&wisata_core::models::place::PlaceRecord, f64)> = candidates
            .into_iter()
            .filter_map(|record| {
                let point = self.directory.canonical(record.id, query.method)?;
                let distance =
                    geodesic_km(query.latitude, query.longitude, point.latitude, point.longitude);
                Some((record, distance))
            })
            .collect();

        if let Some(radius_km) = query.radius_km {
            scored.retain(|(_, distance)| *distance <= radius_km);
        }

        if scored.is_empty() {
            return Err(WisataError::EmptyAfterRadius { radius_km: query.radius_km });
        }

        // Stable sort: ties keep the original record order.
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(query.k);

        let name_column = self.directory.name_column();
        Ok(scored
            .into_iter()
            .map(|(record, distance)| {
                PlaceItem::from_record(
                    record,
                    self.directory.canonical(record.id, query.method),
                    Some(distance),
                    name_column,
                )
            })
            .collect())
    }
}
