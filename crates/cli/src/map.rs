//! Map output: GeoJSON feature collections and a standalone Leaflet page.

use geocatalog_core::error::{Error, ErrorCode, Result};
use geocatalog_geo::{Coordinate, DistanceRecord, LocationDocument};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::{json, Value};

/// Geographic center of Brazil, used when there is nothing to center on.
const FALLBACK_CENTER: Coordinate = Coordinate {
    latitude: -14.235,
    longitude: -51.9253,
};

const MAP_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{title}}</title>
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
  <div id="map"></div>
  <script>
    const data = {{{geojson}}};
    const map = L.map('map').setView([{{center.latitude}}, {{center.longitude}}], {{zoom}});
    L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
      maxZoom: 19,
      attribution: '&copy; OpenStreetMap contributors'
    }).addTo(map);
    const layer = L.geoJSON(data, {
      pointToLayer: (feature, latlng) => feature.properties.role === 'center'
        ? L.circleMarker(latlng, { radius: 6, color: '#d33' })
        : L.marker(latlng),
      onEachFeature: (feature, marker) => {
        const p = feature.properties;
        const lines = [p.name, p.description, p.distance_km != null ? p.distance_km + ' km' : null];
        marker.bindPopup(lines.filter(Boolean).map(s => String(s).replace(/</g, '&lt;')).join('<br>'));
      }
    }).addTo(map);
    {{#if radius_m}}
    const circle = L.circle([{{center.latitude}}, {{center.longitude}}], { radius: {{radius_m}} }).addTo(map);
    map.fitBounds(circle.getBounds());
    {{else}}
    if (layer.getLayers().length > 1) { map.fitBounds(layer.getBounds(), { padding: [24, 24] }); }
    {{/if}}
  </script>
</body>
</html>
"#;

/// One point on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Label
    pub name: String,
    /// Popup text
    pub description: String,
    /// Position
    pub coordinate: Coordinate,
    /// Distance to the search center, for radius results
    pub distance_km: Option<f64>,
}

/// Markers for every document with usable coordinates.
pub fn markers_from_documents(documents: &[LocationDocument]) -> Vec<Marker> {
    documents
        .iter()
        .filter_map(|doc| doc.to_entity().ok())
        .map(|entity| Marker {
            name: entity.name,
            description: entity.description,
            coordinate: entity.coordinate,
            distance_km: None,
        })
        .collect()
}

/// Markers for radius search results.
pub fn markers_from_records(records: &[DistanceRecord]) -> Vec<Marker> {
    records
        .iter()
        .map(|record| Marker {
            name: record.entity.name.clone(),
            description: record.entity.description.clone(),
            coordinate: record.entity.coordinate,
            distance_km: Some(record.distance_km),
        })
        .collect()
}

/// What to draw.
#[derive(Debug, Clone)]
pub struct MapView {
    /// Page title
    pub title: String,
    /// Points of interest
    pub markers: Vec<Marker>,
    /// Search center, drawn as a distinct point
    pub center: Option<Coordinate>,
    /// Search radius, drawn as a circle around `center`
    pub radius_km: Option<f64>,
}

impl MapView {
    /// GeoJSON `FeatureCollection` of the markers, plus the center if set.
    /// Positions are `[longitude, latitude]` as GeoJSON requires.
    pub fn to_geojson(&self) -> Value {
        let mut features: Vec<Value> = self
            .markers
            .iter()
            .map(|m| {
                json!({
                    "type": "Feature",
                    "geometry": point(&m.coordinate),
                    "properties": {
                        "role": "location",
                        "name": m.name,
                        "description": m.description,
                        "distance_km": m.distance_km,
                    }
                })
            })
            .collect();

        if let Some(center) = &self.center {
            features.push(json!({
                "type": "Feature",
                "geometry": point(center),
                "properties": {
                    "role": "center",
                    "name": "Search center",
                    "radius_km": self.radius_km,
                }
            }));
        }

        json!({ "type": "FeatureCollection", "features": features })
    }

    /// Where the map opens: the search center, else the mean marker position.
    pub fn focus(&self) -> Coordinate {
        if let Some(center) = self.center {
            return center;
        }
        if self.markers.is_empty() {
            return FALLBACK_CENTER;
        }
        let n = self.markers.len() as f64;
        let (lat, lon) = self.markers.iter().fold((0.0, 0.0), |(lat, lon), m| {
            (lat + m.coordinate.latitude, lon + m.coordinate.longitude)
        });
        Coordinate::new(lat / n, lon / n)
    }

    /// Standalone HTML page rendering the view with Leaflet.
    pub fn render_html(&self) -> Result<String> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string("map", MAP_TEMPLATE)
            .map_err(|e| Error::new(ErrorCode::Internal, "Invalid map template").with_source(e))?;

        // keep "</script>" inside names from closing the script block
        let geojson = self.to_geojson().to_string().replace("</", "<\\/");
        let zoom = if self.markers.is_empty() && self.center.is_none() { 4 } else { 13 };

        let data = json!({
            "title": self.title,
            "geojson": geojson,
            "center": self.focus(),
            "zoom": zoom,
            "radius_m": self
                .center
                .and(self.radius_km)
                .filter(|r| *r > 0.0)
                .map(|r| r * 1000.0),
        });

        registry
            .render("map", &data)
            .map_err(|e| Error::new(ErrorCode::Internal, "Failed to render map").with_source(e))
    }
}

fn point(coordinate: &Coordinate) -> Value {
    json!({
        "type": "Point",
        "coordinates": [coordinate.longitude, coordinate.latitude],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocatalog_geo::filter_by_radius;

    fn docs() -> Vec<LocationDocument> {
        vec![
            LocationDocument::new("Marco Zero", "Recife", "PE", Coordinate::new(-8.0631, -34.8711), "Praça"),
            LocationDocument::new("Paço do Frevo", "Recife", "PE", Coordinate::new(-8.0616, -34.8717), ""),
        ]
    }

    #[test]
    fn test_geojson_uses_lon_lat_order() {
        let view = MapView {
            title: "Recife".into(),
            markers: markers_from_documents(&docs()),
            center: None,
            radius_km: None,
        };
        let geojson = view.to_geojson();

        assert_eq!(geojson["type"], "FeatureCollection");
        assert_eq!(geojson["features"].as_array().unwrap().len(), 2);
        assert_eq!(geojson["features"][0]["geometry"]["coordinates"], json!([-34.8711, -8.0631]));
    }

    #[test]
    fn test_center_feature_added() {
        let center = Coordinate::new(-8.0631, -34.8711);
        let records = filter_by_radius(&docs(), center.latitude, center.longitude, 1.0);
        let view = MapView {
            title: "Nearby".into(),
            markers: markers_from_records(&records),
            center: Some(center),
            radius_km: Some(1.0),
        };
        let features = view.to_geojson()["features"].as_array().unwrap().clone();

        assert_eq!(features.len(), 3);
        assert_eq!(features[2]["properties"]["role"], "center");
        assert_eq!(features[0]["properties"]["distance_km"], json!(0.0));
    }

    #[test]
    fn test_focus_falls_back() {
        let view = MapView { title: "Empty".into(), markers: vec![], center: None, radius_km: None };
        assert_eq!(view.focus(), FALLBACK_CENTER);
    }

    #[test]
    fn test_focus_mean_of_markers() {
        let view = MapView {
            title: "Two".into(),
            markers: markers_from_documents(&[
                LocationDocument::new("A", "X", "XX", Coordinate::new(0.0, 0.0), ""),
                LocationDocument::new("B", "X", "XX", Coordinate::new(2.0, 4.0), ""),
            ]),
            center: None,
            radius_km: None,
        };
        assert_eq!(view.focus(), Coordinate::new(1.0, 2.0));
    }

    #[test]
    fn test_render_html() {
        let view = MapView {
            title: "Recife & arredores".into(),
            markers: markers_from_documents(&docs()),
            center: Some(Coordinate::new(-8.0631, -34.8711)),
            radius_km: Some(2.0),
        };
        let html = view.render_html().unwrap();

        assert!(html.contains("leaflet.js"));
        assert!(html.contains("Recife &amp; arredores"));
        assert!(html.contains("radius: 2000"));
        assert!(html.contains("Paço do Frevo"));
    }

    #[test]
    fn test_render_html_escapes_script_close() {
        let mut doc = docs().remove(0);
        doc.name = "</script><b>".into();
        let view = MapView {
            title: "x".into(),
            markers: markers_from_documents(&[doc]),
            center: None,
            radius_km: None,
        };
        let html = view.render_html().unwrap();

        assert!(!html.contains("</script><b>"));
        assert!(html.contains("<\\/script><b>"));
    }
}
