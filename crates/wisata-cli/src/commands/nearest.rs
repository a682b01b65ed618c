use anyhow::{Context, Result};
use serde::Serialize;
use tabled::Tabled;

use wisata_core::models::place::PointMethod;
use wisata_retrieval::{
    nearest_or_widen, NearestPipeline, NearestQuery, PlaceItem, WidenedResult,
};

use crate::cli::NearestArgs;
use crate::output::OutputWriter;

#[derive(Tabled)]
struct NearestRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Distance (km)")]
    distance: String,
    #[tabled(rename = "Latitude")]
    latitude: String,
    #[tabled(rename = "Longitude")]
    longitude: String,
}

#[derive(Serialize)]
struct NearestOutput {
    user_lat: f64,
    user_lon: f64,
    method: PointMethod,
    k: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius_km: Option<f64>,
    widened: bool,
    count: usize,
    items: Vec<PlaceItem>,
}

pub fn execute(args: NearestArgs, pipeline: &NearestPipeline, output: &OutputWriter) -> Result<()> {
    let method: PointMethod = args.method.parse().context("Invalid --method")?;

    let mut query = NearestQuery::new(args.lat, args.lon).with_k(args.k).with_method(method);
    if let Some(name) = &args.name {
        query = query.with_name(name.clone());
    }
    if let Some(radius_km) = args.radius_km {
        query = query.with_radius_km(radius_km);
    }

    let result = if args.widen {
        nearest_or_widen(pipeline, &query).context("Query failed")?
    } else {
        WidenedResult {
            places: pipeline.execute(&query).context("Query failed")?,
            widened: false,
        }
    };

    if output.is_json() {
        return output.result(NearestOutput {
            user_lat: args.lat,
            user_lon: args.lon,
            method,
            k: query.k,
            radius_km: query.radius_km,
            widened: result.widened,
            count: result.places.len(),
            items: result.places,
        });
    }

    output.section("Query");
    output.kv("Location", format!("{:.6}, {:.6}", args.lat, args.lon));
    output.kv("Method", method);
    output.kv("Top K", query.k);
    if let Some(radius_km) = query.radius_km {
        output.kv("Radius (km)", format!("{:.2}", radius_km));
    }

    if result.widened {
        output.warning("Nothing within the radius; showing the unbounded nearest instead.");
    }

    if let Some(first) = result.places.first() {
        output.success(format!(
            "Nearest: {} — {:.2} km",
            first.name.as_deref().unwrap_or("(unnamed)"),
            first.distance_km.unwrap_or_default()
        ));
    }

    output.section("Results");
    let rows: Vec<NearestRow> = result
        .places
        .iter()
        .enumerate()
        .map(|(i, place)| NearestRow {
            rank: i + 1,
            name: place.name.clone().unwrap_or_else(|| "(unnamed)".to_string()),
            category: place.category.clone().unwrap_or_default(),
            distance: place
                .distance_km
                .map(|d| format!("{:.2}", d))
                .unwrap_or_default(),
            latitude: place.latitude.map(|v| format!("{:.6}", v)).unwrap_or_default(),
            longitude: place.longitude.map(|v| format!("{:.6}", v)).unwrap_or_default(),
        })
        .collect();
    output.table(rows);

    output.section("Directions");
    for (i, place) in result.places.iter().enumerate() {
        if let (Some(lat), Some(lon)) = (place.latitude, place.longitude) {
            output.info(format!(
                "{}. {}: {}",
                i + 1,
                place.name.as_deref().unwrap_or("(unnamed)"),
                directions_url(args.lat, args.lon, lat, lon)
            ));
        }
    }

    Ok(())
}

/// Directions-style link for a result, from the user location.
fn directions_url(from_lat: f64, from_lon: f64, to_lat: f64, to_lon: f64) -> String {
    format!("https://www.google.com/maps/dir/{},{}/{},{}", from_lat, from_lon, to_lat, to_lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_url_shape() {
        let url = directions_url(-7.7956, 110.3695, -7.6079, 110.2038);
        assert_eq!(
            url,
            "https://www.google.com/maps/dir/-7.7956,110.3695/-7.6079,110.2038"
        );
    }
}
