//! Wisata Geo - Geometry conversions, CRS normalization, and distance
//!
//! This crate handles the geospatial mechanics of the system: conversions
//! between the canonical geometry enum and `geo` crate types, best-effort
//! reprojection to WGS 84, anchor-point selection, and geodesic distance.

pub mod anchor;
pub mod distance;
pub mod models;
pub mod spatial;
pub mod transform;
