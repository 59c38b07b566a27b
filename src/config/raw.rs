use duration_str::deserialize_duration;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = include_str!("walkmap.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub map: Option<Map>,
    pub requests: Option<Requests>,
    pub gateway: Option<Gateway>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Map {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: f64,
    pub tile_url: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl Default for Map {
    fn default() -> Self {
        Config::default().map.expect("Map configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Requests {
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for Requests {
    fn default() -> Self {
        Config::default().requests.expect("Requests configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub nominatim: Option<Nominatim>,
    pub openrouteservice: Option<OpenRouteService>,
    pub reports: Option<Reports>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Nominatim {
    pub base_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OpenRouteService {
    pub base_url: String,
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Reports {
    pub base_url: String,
}

impl Default for Nominatim {
    fn default() -> Self {
        Config::default()
            .gateway
            .and_then(|gw| gw.nominatim)
            .expect("Nominatim configuration")
    }
}

impl Default for OpenRouteService {
    fn default() -> Self {
        Config::default()
            .gateway
            .and_then(|gw| gw.openrouteservice)
            .expect("OpenRouteService configuration")
    }
}

impl Default for Reports {
    fn default() -> Self {
        Config::default()
            .gateway
            .and_then(|gw| gw.reports)
            .expect("Reports configuration")
    }
}
