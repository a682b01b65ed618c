use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use wisata_core::models::place::{CanonicalPoint, PlaceRecord, PointMethod};

/// Attribute keys that never pass through to presentation: working data
/// either replaced by the canonical point or computed per query.
const WORKING_KEYS: [&str; 4] = ["geometry", "x", "y", "distance_km"];

/// A single nearest-neighbor query against the precomputed tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestQuery {
    /// Query latitude in degrees. Finite, otherwise unvalidated.
    pub latitude: f64,

    /// Query longitude in degrees. Finite, otherwise unvalidated.
    pub longitude: f64,

    /// Maximum number of results
    pub k: usize,

    /// Optional exact, case-insensitive name filter
    pub name: Option<String>,

    /// Optional inclusive radius cutoff in kilometers
    pub radius_km: Option<f64>,

    /// Which precomputed coordinate table to rank against
    pub method: PointMethod,
}

impl NearestQuery {
    /// Create a new query with the default top-3 and no filters
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            k: 3,
            name: None,
            radius_km: None,
            method: PointMethod::default(),
        }
    }

    /// Set the maximum number of results
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the exact-match name filter
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the inclusive radius cutoff in kilometers
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    /// Set the point-selection method
    pub fn with_method(mut self, method: PointMethod) -> Self {
        self.method = method;
        self
    }
}

/// One place, resolved for presentation: well-known fields extracted, the
/// remaining attributes passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceItem {
    /// Original row index of the record
    pub index: u64,

    /// Resolved display name
    pub name: Option<String>,

    /// Resolved category
    pub category: Option<String>,

    /// Resolved address
    pub address: Option<String>,

    /// Canonical latitude; absent when the record failed normalization
    pub latitude: Option<f64>,

    /// Canonical longitude; absent when the record failed normalization
    pub longitude: Option<f64>,

    /// Distance from the query point; present only on ranked results
    pub distance_km: Option<f64>,

    /// All other attributes, minus internal working data
    pub properties: HashMap<String, serde_json::Value>,
}

impl PlaceItem {
    /// Build an item from a record and its canonical point (if any).
    pub fn from_record(
        record: &PlaceRecord,
        canonical: Option<&CanonicalPoint>,
        distance_km: Option<f64>,
        name_column: Option<&str>,
    ) -> Self {
        let properties = record
            .attributes
            .iter()
            .filter(|(key, _)| !WORKING_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            index: record.id,
            name: record.name(name_column),
            category: record.category(),
            address: record.address(),
            latitude: canonical.map(|p| p.latitude),
            longitude: canonical.map(|p| p.longitude),
            distance_km,
            properties,
        }
    }
}
