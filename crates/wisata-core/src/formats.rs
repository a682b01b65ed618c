//! Dataset loading.
//!
//! The loader is a startup-time collaborator: it parses the source file
//! into [`PlaceRecord`]s once, and the query path never touches I/O again.

pub mod geojson;

use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::models::place::PlaceRecord;

/// A parsed dataset plus the file-level metadata reported by `/meta`.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// Dataset name, derived from the file stem
    pub name: String,

    /// Absolute or as-given source path
    pub path: PathBuf,

    /// CRS EPSG code declared by the file; 4326 when unspecified
    pub crs: u32,

    /// Records in original file order; ids are row indices
    pub records: Vec<PlaceRecord>,

    /// Source file size in bytes
    pub size_bytes: u64,

    /// Source file modification time, when the filesystem reports one
    pub modified: Option<DateTime<Utc>>,
}
