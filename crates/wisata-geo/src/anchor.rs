//! Anchor-point selection
//!
//! Reduces a shape to the single point used for distance ranking. Point
//! geometries short-circuit; polygons and multi-part shapes go through the
//! configured selection method.

use geo::algorithm::centroid::Centroid;
use geo::algorithm::interior_point::InteriorPoint;
use geo::Point;

use wisata_core::models::place::{PointMethod, PointSource};

use crate::models::{to_geo_geometry, Geometry};

/// Derive the anchor point for a shape under the given method.
///
/// - A shape that is already a point is used directly.
/// - `Centroid` takes the geometric center of mass, which may fall outside
///   concave or multi-part shapes.
/// - `Representative` takes an interior point (always in or on the shape),
///   falling back to the centroid when the interior point is undefined.
///
/// Returns `None` when no point can be derived at all; the caller excludes
/// the record.
pub fn anchor_point(geometry: &Geometry, method: PointMethod) -> Option<(Point<f64>, PointSource)> {
    if let Geometry::Point { coordinates } = geometry {
        return Some((Point::new(coordinates[0], coordinates[1]), PointSource::AlreadyPoint));
    }

    let geo_geom = to_geo_geometry(geometry);
    match method {
        PointMethod::Centroid => geo_geom.centroid().map(|p| (p, PointSource::Centroid)),
        PointMethod::Representative => geo_geom
            .interior_point()
            .map(|p| (p, PointSource::Representative))
            .or_else(|| geo_geom.centroid().map(|p| (p, PointSource::Centroid))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::algorithm::contains::Contains;

    fn convex_square() -> Geometry {
        Geometry::polygon(vec![vec![
            [110.0, -8.0],
            [110.2, -8.0],
            [110.2, -7.8],
            [110.0, -7.8],
            [110.0, -8.0],
        ]])
    }

    #[test]
    fn test_point_shape_ignores_method() {
        let geom = Geometry::point(110.3695, -7.7956);
        let (repr, src_repr) = anchor_point(&geom, PointMethod::Representative).unwrap();
        let (cent, src_cent) = anchor_point(&geom, PointMethod::Centroid).unwrap();

        assert_eq!(repr, cent);
        assert_eq!(src_repr, PointSource::AlreadyPoint);
        assert_eq!(src_cent, PointSource::AlreadyPoint);
    }

    #[test]
    fn test_convex_polygon_both_methods_inside() {
        let geom = convex_square();
        let polygon = match to_geo_geometry(&geom) {
            geo::Geometry::Polygon(p) => p,
            _ => unreachable!(),
        };

        let (repr, _) = anchor_point(&geom, PointMethod::Representative).unwrap();
        let (cent, _) = anchor_point(&geom, PointMethod::Centroid).unwrap();

        assert!(polygon.contains(&repr));
        assert!(polygon.contains(&cent));
    }

    #[test]
    fn test_centroid_of_square_is_center() {
        let (cent, src) = anchor_point(&convex_square(), PointMethod::Centroid).unwrap();
        assert!((cent.x() - 110.1).abs() < 1e-9);
        assert!((cent.y() - (-7.9)).abs() < 1e-9);
        assert_eq!(src, PointSource::Centroid);
    }

    #[test]
    fn test_empty_polygon_yields_nothing() {
        let geom = Geometry::polygon(vec![]);
        assert!(anchor_point(&geom, PointMethod::Representative).is_none());
        assert!(anchor_point(&geom, PointMethod::Centroid).is_none());
    }

    #[test]
    fn test_empty_multipolygon_yields_nothing() {
        let geom = Geometry::multi_polygon(vec![]);
        assert!(anchor_point(&geom, PointMethod::Representative).is_none());
        assert!(anchor_point(&geom, PointMethod::Centroid).is_none());
    }

    #[test]
    fn test_multipolygon_anchor_stays_inside_a_part() {
        // Two squares far apart; the combined centroid falls between them,
        // the representative point must not.
        let geom = Geometry::multi_polygon(vec![
            vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]],
            vec![vec![[10.0, 0.0], [11.0, 0.0], [11.0, 1.0], [10.0, 1.0], [10.0, 0.0]]],
        ]);
        let multi = match to_geo_geometry(&geom) {
            geo::Geometry::MultiPolygon(mp) => mp,
            _ => unreachable!(),
        };

        let (repr, src) = anchor_point(&geom, PointMethod::Representative).unwrap();
        assert_eq!(src, PointSource::Representative);
        assert!(multi.contains(&repr));

        let (cent, _) = anchor_point(&geom, PointMethod::Centroid).unwrap();
        assert!(!multi.contains(&cent));
    }
}
