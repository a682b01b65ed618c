//! Dataset-level spatial summaries

use geo::algorithm::bounding_rect::BoundingRect;

use crate::models::{to_geo_geometry, Geometry};

/// Bounding box [min_x, min_y, max_x, max_y] of a set of geometries.
/// Returns `None` when no geometry yields a bounding rectangle.
pub fn dataset_bbox<'a, I>(geometries: I) -> Option<[f64; 4]>
where
    I: IntoIterator<Item = &'a Geometry>,
{
    let mut bbox: Option<[f64; 4]> = None;
    for geometry in geometries {
        let rect = match to_geo_geometry(geometry).bounding_rect() {
            Some(rect) => rect,
            None => continue,
        };
        bbox = Some(match bbox {
            None => [rect.min().x, rect.min().y, rect.max().x, rect.max().y],
            Some([min_x, min_y, max_x, max_y]) => [
                min_x.min(rect.min().x),
                min_y.min(rect.min().y),
                max_x.max(rect.max().x),
                max_y.max(rect.max().y),
            ],
        });
    }
    bbox
}
