//! The process-wide place directory
//!
//! Built once at startup from a loaded dataset, then shared read-only with
//! every query. Both point-selection methods are precomputed side by side so
//! no request ever re-derives coordinates. A live reload would swap in a
//! whole new directory, never mutate this one.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

use wisata_core::error::{Result, WisataError};
use wisata_core::formats::LoadedDataset;
use wisata_core::models::place::{
    choose_name_column, dataset_columns, CanonicalPoint, PlaceRecord, PointMethod, NAME_KEYS,
};
use wisata_geo::spatial::dataset_bbox;
use wisata_geo::transform::to_wgs84_lenient;

use crate::models::PlaceItem;
use crate::normalize::{normalize_records, CoordinateTable};

/// Source-file facts reported by the metadata endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// A page of the object listing: total match count plus the sliced items.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub total: usize,
    pub items: Vec<PlaceItem>,
}

/// Immutable dataset cache: records, resolved name column, and the two
/// precomputed coordinate tables.
#[derive(Debug)]
pub struct PlaceDirectory {
    records: Vec<PlaceRecord>,
    name_column: Option<String>,
    representative: CoordinateTable,
    centroid: CoordinateTable,
    crs: u32,
    columns: Vec<String>,
    bbox: [f64; 4],
    source: SourceInfo,
}

impl PlaceDirectory {
    /// Build the directory from a loaded dataset.
    ///
    /// Fails with `MissingBaseData` when a non-empty dataset carries neither
    /// explicit x/y attributes nor any geometry; no query could ever succeed
    /// against it.
    pub fn from_dataset(dataset: LoadedDataset) -> Result<Self> {
        let LoadedDataset { name, path, crs, records, size_bytes, modified } = dataset;

        let has_base = records.iter().any(|r| r.xy.is_some() || r.has_geometry());
        if !records.is_empty() && !has_base {
            return Err(WisataError::MissingBaseData);
        }

        let name_column = choose_name_column(&records);
        let columns = dataset_columns(&records);

        let representative = normalize_records(&records, crs, PointMethod::Representative);
        let centroid = normalize_records(&records, crs, PointMethod::Centroid);

        let bbox = compute_bbox(&records, crs);

        tracing::info!(
            rows = records.len(),
            resolved = representative.len(),
            name_column = name_column.as_deref().unwrap_or("<none>"),
            "Place directory ready"
        );

        Ok(Self {
            records,
            name_column,
            representative,
            centroid,
            crs,
            columns,
            bbox,
            source: SourceInfo { name, path, size_bytes, modified },
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PlaceRecord] {
        &self.records
    }

    pub fn name_column(&self) -> Option<&str> {
        self.name_column.as_deref()
    }

    pub fn crs(&self) -> u32 {
        self.crs
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Dataset bounding box [min_x, min_y, max_x, max_y] in WGS 84;
    /// all zeros when nothing could be derived.
    pub fn bbox(&self) -> [f64; 4] {
        self.bbox
    }

    pub fn source(&self) -> &SourceInfo {
        &self.source
    }

    pub fn has_geometry(&self) -> bool {
        self.records.iter().any(|r| r.has_geometry())
    }

    /// The precomputed coordinate table for a method.
    pub fn table(&self, method: PointMethod) -> &CoordinateTable {
        match method {
            PointMethod::Representative => &self.representative,
            PointMethod::Centroid => &self.centroid,
        }
    }

    /// Canonical point of one record under a method.
    pub fn canonical(&self, id: u64, method: PointMethod) -> Option<&CanonicalPoint> {
        self.table(method).get(&id)
    }

    /// Sorted, deduplicated display names. Uses the resolved name column
    /// when present, otherwise the first candidate key that yields values.
    pub fn unique_names(&self) -> Vec<String> {
        let columns: Vec<&str> = match self.name_column.as_deref() {
            Some(col) => vec![col],
            None => NAME_KEYS.to_vec(),
        };

        for column in columns {
            let names: BTreeSet<String> =
                self.records.iter().filter_map(|r| r.attribute_str(column)).collect();
            if !names.is_empty() {
                return names.into_iter().collect();
            }
        }
        Vec::new()
    }

    /// Paginated object listing without distances. An empty page is a valid
    /// listing, not an error.
    pub fn list_objects(
        &self,
        name: Option<&str>,
        offset: usize,
        limit: usize,
        method: PointMethod,
    ) -> Listing {
        let matched: Vec<&PlaceRecord> = self.filter_by_name(name).collect();
        let total = matched.len();

        let items = matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|record| {
                PlaceItem::from_record(
                    record,
                    self.canonical(record.id, method),
                    None,
                    self.name_column(),
                )
            })
            .collect();

        Listing { total, items }
    }

    /// Records surviving the name filter, in original order. A catch-all or
    /// absent filter passes everything through.
    pub fn filter_by_name<'a>(
        &'a self,
        name: Option<&'a str>,
    ) -> impl Iterator<Item = &'a PlaceRecord> + 'a {
        let active = name.filter(|n| !wisata_core::models::place::is_catch_all(n));
        self.records.iter().filter(move |record| match active {
            Some(filter) => record.matches_name(filter, self.name_column()),
            None => true,
        })
    }
}

/// Dataset bounding box: geometry-derived in WGS 84 when possible, x/y
/// extent as fallback, zeros when neither exists.
fn compute_bbox(records: &[PlaceRecord], crs: u32) -> [f64; 4] {
    let wgs84_geometries: Vec<_> = records
        .iter()
        .filter_map(|r| r.geometry.as_ref())
        .map(|g| to_wgs84_lenient(g, Some(crs)))
        .collect();

    if let Some(bbox) = dataset_bbox(&wgs84_geometries) {
        return bbox;
    }

    let mut xs = records.iter().filter_map(|r| r.xy.map(|[x, _]| x));
    let mut ys = records.iter().filter_map(|r| r.xy.map(|[_, y]| y));
    if let (Some(x0), Some(y0)) = (xs.next(), ys.next()) {
        let (min_x, max_x) = xs.fold((x0, x0), |(lo, hi), x| (lo.min(x), hi.max(x)));
        let (min_y, max_y) = ys.fold((y0, y0), |(lo, hi), y| (lo.min(y), hi.max(y)));
        return [min_x, min_y, max_x, max_y];
    }

    [0.0, 0.0, 0.0, 0.0]
}
