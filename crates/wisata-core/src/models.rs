//! Domain models shared across the wisata crates.

pub mod geometry;
pub mod place;

pub use geometry::Geometry;
pub use place::{
    choose_name_column, dataset_columns, is_catch_all, CanonicalPoint, PlaceRecord, PointMethod,
    PointSource, ADDRESS_KEY, CATEGORY_KEY, NAME_KEYS,
};
