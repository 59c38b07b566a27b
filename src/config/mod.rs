use anyhow::{anyhow, Result};
use std::{env, fs, io::ErrorKind, path::Path, time::Duration};
use walkmap_core::{
    entities::geo::MapPoint,
    map::{MapOptions, TileLayerOptions},
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "walkmap.toml";

const ENV_NAME_ORS_API_KEY: &str = "ORS_API_KEY";

#[derive(Debug)]
pub struct Config {
    pub map: MapOptions,
    pub requests: Requests,
    pub nominatim: Nominatim,
    pub openrouteservice: OpenRouteService,
    pub reports: Reports,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(api_key) = env::var(ENV_NAME_ORS_API_KEY) {
            cfg.openrouteservice.api_key = Some(api_key);
        }
        Ok(cfg)
    }
}

#[derive(Debug)]
pub struct Requests {
    /// Upper bound for every outbound request.
    pub timeout: Duration,
    pub user_agent: String,
}

#[derive(Debug)]
pub struct Nominatim {
    pub base_url: String,
}

pub struct OpenRouteService {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for OpenRouteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouteService")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl OpenRouteService {
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty()).ok_or_else(|| {
            anyhow!(
                "Missing OpenRouteService API key: set {ENV_NAME_ORS_API_KEY} or 'gateway.openrouteservice.api-key'"
            )
        })
    }
}

#[derive(Debug)]
pub struct Reports {
    pub base_url: String,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            map,
            requests,
            gateway,
        } = from;

        let raw::Map {
            center_lat,
            center_lng,
            zoom,
            tile_url,
            attribution,
            max_zoom,
        } = map.unwrap_or_default();

        let center = MapPoint::try_from_lat_lng_deg(center_lat, center_lng)?;
        if zoom < 0.0 || zoom > f64::from(max_zoom) {
            return Err(anyhow!(
                "Invalid map zoom level {zoom} (max. zoom = {max_zoom})"
            ));
        }
        if tile_url.trim().is_empty() {
            return Err(anyhow!("Missing tile URL"));
        }
        let map = MapOptions {
            center,
            zoom,
            tile_layer: TileLayerOptions {
                url_template: tile_url,
                attribution,
                max_zoom,
            },
        };

        let raw::Requests {
            timeout,
            user_agent,
        } = requests.unwrap_or_default();
        if timeout.is_zero() {
            return Err(anyhow!("The request timeout must not be zero"));
        }
        let requests = Requests {
            timeout,
            user_agent,
        };

        let (nominatim, openrouteservice, reports) = match gateway {
            Some(raw::Gateway {
                nominatim,
                openrouteservice,
                reports,
            }) => (nominatim, openrouteservice, reports),
            None => (None, None, None),
        };

        let raw::Nominatim { base_url } = nominatim.unwrap_or_default();
        let nominatim = Nominatim { base_url };

        let raw::OpenRouteService { base_url, api_key } = openrouteservice.unwrap_or_default();
        let openrouteservice = OpenRouteService { base_url, api_key };

        let raw::Reports { base_url } = reports.unwrap_or_default();
        let reports = Reports { base_url };

        Ok(Self {
            map,
            requests,
            nominatim,
            openrouteservice,
            reports,
        })
    }
}
