use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::geometry::Geometry;
use crate::error::WisataError;

/// Candidate attribute keys for the display name, checked in priority order.
/// The domain-specific key comes before the generic fallbacks; matching is
/// case-sensitive and order matters.
pub const NAME_KEYS: [&str; 5] = ["nama_objek", "Nama", "name", "NAMOBJ", "namobj"];

/// Attribute key carrying the object category, when present.
pub const CATEGORY_KEY: &str = "jenis_obje";

/// Attribute key carrying the address, when present.
pub const ADDRESS_KEY: &str = "alamat";

/// Catch-all filter values that disable name filtering. The source data
/// historically used the localized form alongside the plain one.
const CATCH_ALL_NAMES: [&str; 2] = ["all", "semua"];

/// Whether a name-filter value means "no filter".
pub fn is_catch_all(name: &str) -> bool {
    CATCH_ALL_NAMES.iter().any(|s| name.eq_ignore_ascii_case(s))
}

/// Point-selection method for deriving a single coordinate from a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PointMethod {
    /// A point guaranteed to lie inside or on the shape.
    #[default]
    Representative,
    /// The geometric center of mass; may fall outside concave shapes.
    Centroid,
}

impl PointMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointMethod::Representative => "representative",
            PointMethod::Centroid => "centroid",
        }
    }
}

impl fmt::Display for PointMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PointMethod {
    type Err = WisataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "representative" => Ok(PointMethod::Representative),
            "centroid" => Ok(PointMethod::Centroid),
            _ => Err(WisataError::ConfigInvalid {
                key: "method".to_string(),
                reason: format!("Invalid point method: {}. Use representative or centroid", s),
            }),
        }
    }
}

/// Which rule produced a canonical point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointSource {
    Representative,
    Centroid,
    AlreadyPoint,
    ExplicitXy,
}

/// The single resolved coordinate used for all distance computations for a
/// record, under a given point-selection method. Degrees, WGS 84.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub source: PointSource,
}

impl CanonicalPoint {
    pub fn new(latitude: f64, longitude: f64, source: PointSource) -> Self {
        Self { latitude, longitude, source }
    }
}

/// One point-of-interest record.
///
/// Well-known fields (name, category, address) are resolved out of the
/// attribute map on demand; everything else passes through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Stable identifier: the original row index in the source file.
    pub id: u64,

    /// Geometry, when the source feature carried one.
    pub geometry: Option<Geometry>,

    /// Explicit (longitude, latitude) pair from x/y attributes, when present.
    /// Always wins over shape-derived points.
    pub xy: Option<[f64; 2]>,

    /// All feature properties, preserved as-is.
    pub attributes: HashMap<String, serde_json::Value>,
}

impl PlaceRecord {
    pub fn new(
        id: u64,
        geometry: Option<Geometry>,
        xy: Option<[f64; 2]>,
        attributes: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self { id, geometry, xy, attributes }
    }

    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }

    /// Attribute value rendered as a string; null and missing yield None.
    pub fn attribute_str(&self, key: &str) -> Option<String> {
        value_as_string(self.attributes.get(key)?)
    }

    /// Resolve the display name: the dataset-level name column first, then
    /// the candidate keys in priority order.
    pub fn name(&self, name_column: Option<&str>) -> Option<String> {
        if let Some(col) = name_column {
            if let Some(v) = self.attribute_str(col) {
                return Some(v);
            }
        }
        NAME_KEYS.iter().find_map(|key| self.attribute_str(key))
    }

    pub fn category(&self) -> Option<String> {
        self.attribute_str(CATEGORY_KEY)
    }

    pub fn address(&self) -> Option<String> {
        self.attribute_str(ADDRESS_KEY)
    }

    /// Exact, case-insensitive name match, OR-combined across the resolved
    /// name column and every candidate key present on the record. The
    /// redundancy tolerates inconsistent source schemas.
    pub fn matches_name(&self, filter: &str, name_column: Option<&str>) -> bool {
        let wanted = filter.to_lowercase();
        name_column
            .into_iter()
            .chain(NAME_KEYS)
            .any(|key| match self.attribute_str(key) {
                Some(v) => v.to_lowercase() == wanted,
                None => false,
            })
    }
}

/// Pick the dataset-level name column: the first candidate key present on
/// any record. Returns None when no candidate exists anywhere.
pub fn choose_name_column(records: &[PlaceRecord]) -> Option<String> {
    NAME_KEYS
        .iter()
        .find(|key| records.iter().any(|r| r.attributes.contains_key(**key)))
        .map(|key| key.to_string())
}

/// Union of attribute keys across all records, in first-seen order.
pub fn dataset_columns(records: &[PlaceRecord]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut columns = Vec::new();
    for record in records {
        for key in record.attributes.keys() {
            if seen.insert(key.clone()) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

fn value_as_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(attrs: &[(&str, serde_json::Value)]) -> PlaceRecord {
        let attributes =
            attrs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect::<HashMap<_, _>>();
        PlaceRecord::new(0, None, None, attributes)
    }

    #[test]
    fn test_name_priority_order() {
        let record = record_with(&[
            ("name", serde_json::json!("generic")),
            ("nama_objek", serde_json::json!("Candi Borobudur")),
        ]);
        assert_eq!(record.name(None).as_deref(), Some("Candi Borobudur"));
    }

    #[test]
    fn test_name_column_wins_over_candidates() {
        let record = record_with(&[
            ("NAMOBJ", serde_json::json!("from column")),
            ("name", serde_json::json!("from fallback")),
        ]);
        assert_eq!(record.name(Some("NAMOBJ")).as_deref(), Some("from column"));
    }

    #[test]
    fn test_name_falls_back_when_column_null() {
        let record = record_with(&[
            ("nama_objek", serde_json::Value::Null),
            ("name", serde_json::json!("fallback")),
        ]);
        assert_eq!(record.name(Some("nama_objek")).as_deref(), Some("fallback"));
    }

    #[test]
    fn test_matches_name_case_insensitive() {
        let record = record_with(&[("nama_objek", serde_json::json!("candi borobudur"))]);
        assert!(record.matches_name("Candi Borobudur", Some("nama_objek")));
        assert!(record.matches_name("CANDI BOROBUDUR", None));
        assert!(!record.matches_name("Candi Prambanan", None));
    }

    #[test]
    fn test_matches_name_across_any_candidate_key() {
        let record = record_with(&[
            ("Nama", serde_json::json!("Pantai Parangtritis")),
            ("NAMOBJ", serde_json::json!("something else")),
        ]);
        // A match on any candidate key is enough.
        assert!(record.matches_name("pantai parangtritis", Some("NAMOBJ")));
    }

    #[test]
    fn test_catch_all_sentinels() {
        assert!(is_catch_all("all"));
        assert!(is_catch_all("All"));
        assert!(is_catch_all("SEMUA"));
        assert!(!is_catch_all("Candi Borobudur"));
    }

    #[test]
    fn test_choose_name_column() {
        let records = vec![
            record_with(&[("name", serde_json::json!("a"))]),
            record_with(&[("Nama", serde_json::json!("b"))]),
        ];
        // "Nama" outranks "name" even though "name" appears first in the data.
        assert_eq!(choose_name_column(&records).as_deref(), Some("Nama"));
        assert_eq!(choose_name_column(&[]), None);
    }

    #[test]
    fn test_point_method_parsing() {
        assert_eq!("representative".parse::<PointMethod>().unwrap(), PointMethod::Representative);
        assert_eq!("CENTROID".parse::<PointMethod>().unwrap(), PointMethod::Centroid);
        assert!("voronoi".parse::<PointMethod>().is_err());
    }

    #[test]
    fn test_numeric_attribute_stringified() {
        let record = record_with(&[("nama_objek", serde_json::json!(42))]);
        assert_eq!(record.name(None).as_deref(), Some("42"));
    }
}
