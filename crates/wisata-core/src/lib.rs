//! Wisata Core - Domain models, errors, configuration, and dataset loading
//!
//! This crate contains the shared domain types for the wisata system:
//! point-of-interest records, canonical points, the error taxonomy, the
//! layered configuration, and the GeoJSON dataset loader.

pub mod config;
pub mod error;
pub mod formats;
pub mod models;

pub use error::{Result, WisataError};
