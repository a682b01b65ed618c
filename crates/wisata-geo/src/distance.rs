//! Geodesic distance
//!
//! Distances are measured on the WGS 84 ellipsoid and reported in
//! kilometers. Inputs are plain floating-point degrees; out-of-range values
//! are computed as given rather than rejected.

use geo::{Distance, Geodesic, Point};

/// Geodesic distance in kilometers between two (latitude, longitude) pairs.
pub fn geodesic_km(a_lat: f64, a_lon: f64, b_lat: f64, b_lon: f64) -> f64 {
    Geodesic.distance(Point::new(a_lon, a_lat), Point::new(b_lon, b_lat)) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_distance_at_identity() {
        let d = geodesic_km(-7.7956, 110.3695, -7.7956, 110.3695);
        assert!(d.abs() < 1e-6, "distance to self should be ~0, got {}", d);
    }

    #[test]
    fn test_known_distance_paris_london() {
        // Paris (48.8566, 2.3522) to London (51.5074, -0.1276) ≈ 344 km
        let d = geodesic_km(48.8566, 2.3522, 51.5074, -0.1276);
        assert!(d > 339.0 && d < 349.0, "Paris-London distance {} should be ~344 km", d);
    }

    #[test]
    fn test_yogyakarta_to_borobudur() {
        // Yogyakarta city center to the Borobudur temple is ~25-30 km.
        let d = geodesic_km(-7.7956, 110.3695, -7.6079, 110.2038);
        assert!(d > 20.0 && d < 35.0, "unexpected distance {}", d);
    }

    proptest! {
        #[test]
        fn prop_distance_is_symmetric(
            lat1 in -80.0f64..80.0,
            lon1 in -179.0f64..179.0,
            lat2 in -80.0f64..80.0,
            lon2 in -179.0f64..179.0,
        ) {
            let ab = geodesic_km(lat1, lon1, lat2, lon2);
            let ba = geodesic_km(lat2, lon2, lat1, lon1);
            prop_assert!((ab - ba).abs() < 1e-9);
        }

        #[test]
        fn prop_distance_is_non_negative(
            lat1 in -80.0f64..80.0,
            lon1 in -179.0f64..179.0,
            lat2 in -80.0f64..80.0,
            lon2 in -179.0f64..179.0,
        ) {
            prop_assert!(geodesic_km(lat1, lon1, lat2, lon2) >= 0.0);
        }

        #[test]
        fn prop_distance_to_self_is_zero(
            lat in -80.0f64..80.0,
            lon in -179.0f64..179.0,
        ) {
            prop_assert!(geodesic_km(lat, lon, lat, lon).abs() < 1e-6);
        }
    }
}
