//! Wisata Retrieval - Canonical coordinate tables and nearest-neighbor ranking
//!
//! This crate turns loaded place records into precomputed coordinate tables
//! (one per point-selection method), holds them in an immutable
//! [`directory::PlaceDirectory`], and answers nearest-neighbor queries over
//! them with a full linear scan. The widen-on-empty retry lives in
//! [`fallback`] as caller-side policy, outside the ranker.

pub mod directory;
pub mod fallback;
pub mod models;
pub mod normalize;
pub mod pipeline;

pub use directory::PlaceDirectory;
pub use fallback::{nearest_or_widen, WidenedResult, WIDENED_LIMIT};
pub use models::{NearestQuery, PlaceItem};
pub use pipeline::NearestPipeline;
