//! # walkmap-boundary
//!
//! Wire formats of the address lookup service (Nominatim),
//! the routing service (OpenRouteService directions as GeoJSON)
//! and the report submission endpoint.

use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[cfg(feature = "entity-conversions")]
pub use self::conv::*;

/// A single result of an address lookup.
///
/// Coordinates are transmitted as decimal-degree strings.
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct PlaceResult {
    pub display_name : String,
    pub lat          : String,
    pub lon          : String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Feature {
    #[serde(default)]
    pub geometry: Geometry,
}

#[derive(Default, Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Geometry {
    /// Positions in longitude, latitude (, elevation) order.
    #[serde(default)]
    pub coordinates: Vec<Vec<f64>>,
}

/// A report as expected by the report submission endpoint.
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub longitude     : f64,
    pub latitude      : f64,
    pub type_problem  : String,
    pub description   : String,
    pub photo         : String,
    /// RFC 3339
    pub date_creation : String,
    pub email_user    : String,
    pub id_lieu       : String,
    pub id_itineraire : Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, thiserror::Error))]
#[cfg_attr(feature = "extra-derive", error("{message} ({http_status})"))]
pub struct Error {
    #[serde(default)]
    pub http_status: u16,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_place_results() {
        let json = r#"[{
            "place_id": 1234,
            "display_name": "Toulouse, Haute-Garonne, Occitanie, France",
            "lat": "43.6044622",
            "lon": "1.4442469",
            "importance": 0.78
        }]"#;
        let results: Vec<PlaceResult> = serde_json::from_str(json).unwrap();
        assert_eq!(1, results.len());
        assert_eq!("43.6044622", results[0].lat);
        assert_eq!("1.4442469", results[0].lon);
    }

    #[test]
    fn deserialize_feature_collection() {
        let json = r#"{
            "type": "FeatureCollection",
            "bbox": [1.44, 43.60, 1.45, 43.61],
            "features": [{
                "type": "Feature",
                "properties": { "summary": { "distance": 1234.5, "duration": 888.8 } },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[1.44, 43.60], [1.445, 43.605], [1.45, 43.61]]
                }
            }]
        }"#;
        let fc: FeatureCollection = serde_json::from_str(json).unwrap();
        assert_eq!(1, fc.features.len());
        assert_eq!(vec![1.44, 43.60], fc.features[0].geometry.coordinates[0]);
    }

    #[test]
    fn deserialize_feature_collection_without_features() {
        let fc: FeatureCollection = serde_json::from_str(r#"{"type":"FeatureCollection"}"#).unwrap();
        assert!(fc.features.is_empty());
    }

    #[test]
    fn serialize_report_record_in_camel_case() {
        let record = ReportRecord {
            longitude: 2.3522,
            latitude: 48.8566,
            type_problem: "pothole".into(),
            description: "deep".into(),
            photo: String::new(),
            date_creation: "2024-01-01T00:00:00Z".into(),
            email_user: "user@example.com".into(),
            id_lieu: "42".into(),
            id_itineraire: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!("pothole", json["typeProblem"]);
        assert_eq!("2024-01-01T00:00:00Z", json["dateCreation"]);
        assert_eq!("user@example.com", json["emailUser"]);
        assert_eq!("42", json["idLieu"]);
        assert!(json["idItineraire"].is_null());
    }
}
