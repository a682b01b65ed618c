//! CRS normalization
//!
//! The working coordinate reference for all distance computation is WGS 84
//! degrees. Reprojection is best-effort: a failure leaves the coordinates
//! as-is rather than dropping the record or aborting the batch.

use geo::MapCoords;
use proj::Proj;
use wisata_core::error::{Result, WisataError};

use crate::models::{from_geo_geometry, to_geo_geometry, Geometry, WGS84_EPSG};

/// Reproject a geometry between two EPSG-coded reference systems.
pub fn reproject_geometry(geometry: &Geometry, from_epsg: u32, to_epsg: u32) -> Result<Geometry> {
    if from_epsg == to_epsg {
        return Ok(geometry.clone());
    }

    let from = format!("EPSG:{}", from_epsg);
    let to = format!("EPSG:{}", to_epsg);

    let proj = Proj::new_known_crs(&from, &to, None).map_err(|e| WisataError::ConfigInvalid {
        key: "crs".to_string(),
        reason: format!("Failed to create projection from {} to {}: {}", from, to, e),
    })?;

    let geo_geom = to_geo_geometry(geometry);
    let transformed = geo_geom
        .try_map_coords(|coord| {
            proj.convert((coord.x, coord.y)).map(|(x, y)| geo::Coord { x, y })
        })
        .map_err(|e| WisataError::ConfigInvalid {
            key: "crs".to_string(),
            reason: format!("Projection failed: {}", e),
        })?;

    Ok(from_geo_geometry(&transformed))
}

/// Normalize a geometry to WGS 84, leniently.
///
/// An unspecified source CRS is assumed to already be WGS 84 and passed
/// through without reprojecting. A specified, different CRS is reprojected;
/// on failure the original coordinates are kept and a warning is emitted.
pub fn to_wgs84_lenient(geometry: &Geometry, from_epsg: Option<u32>) -> Geometry {
    let from_epsg = match from_epsg {
        None => return geometry.clone(),
        Some(epsg) if epsg == WGS84_EPSG => return geometry.clone(),
        Some(epsg) => epsg,
    };

    match reproject_geometry(geometry, from_epsg, WGS84_EPSG) {
        Ok(reprojected) => reprojected,
        Err(e) => {
            tracing::warn!(
                from_epsg = from_epsg,
                error = %e,
                "Reprojection to WGS 84 failed; keeping source coordinates"
            );
            geometry.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_crs_is_identity() {
        let geom = Geometry::point(110.0, -7.5);
        let out = reproject_geometry(&geom, 4326, 4326).unwrap();
        assert_eq!(geom, out);
    }

    #[test]
    fn test_lenient_passthrough_for_unspecified_crs() {
        let geom = Geometry::point(110.0, -7.5);
        assert_eq!(to_wgs84_lenient(&geom, None), geom);
    }

    #[test]
    fn test_lenient_passthrough_for_wgs84() {
        let geom = Geometry::point(110.0, -7.5);
        assert_eq!(to_wgs84_lenient(&geom, Some(4326)), geom);
    }

    #[test]
    fn test_web_mercator_reprojection() {
        // Web Mercator origin maps onto the WGS 84 origin.
        let geom = Geometry::point(0.0, 0.0);
        let out = reproject_geometry(&geom, 3857, 4326).unwrap();
        match out {
            Geometry::Point { coordinates } => {
                assert!(coordinates[0].abs() < 1e-6);
                assert!(coordinates[1].abs() < 1e-6);
            }
            other => panic!("Expected Point, got {:?}", other),
        }
    }

    #[test]
    fn test_lenient_keeps_coordinates_on_bogus_crs() {
        let geom = Geometry::point(110.0, -7.5);
        // EPSG:0 does not exist; the lenient path must fall back, not panic.
        assert_eq!(to_wgs84_lenient(&geom, Some(0)), geom);
    }
}
