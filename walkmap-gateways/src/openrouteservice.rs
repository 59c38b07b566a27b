use async_trait::async_trait;
use reqwest::{Client, Request};
use walkmap_boundary::FeatureCollection;
use walkmap_core::{
    entities::{geo::MapPoint, route::Route},
    gateways::{routing::RoutingGateway, GatewayError},
};

use crate::{http, trim_base_url};

pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

const PROFILE: &str = "foot-walking";

/// Walking directions from OpenRouteService.
#[derive(Clone)]
pub struct OpenRouteService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for OpenRouteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouteService")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenRouteService {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base_url(base_url.into()),
            api_key: api_key.into(),
        }
    }

    fn directions_request(&self, start: MapPoint, end: MapPoint) -> reqwest::Result<Request> {
        self.client
            .get(format!("{}/v2/directions/{PROFILE}", self.base_url))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("start", lng_lat_param(start).as_str()),
                ("end", lng_lat_param(end).as_str()),
            ])
            .build()
    }
}

/// The service expects longitude first.
fn lng_lat_param(pos: MapPoint) -> String {
    let (lng, lat) = pos.to_lng_lat();
    format!("{lng},{lat}")
}

#[async_trait(?Send)]
impl RoutingGateway for OpenRouteService {
    async fn walking_route(
        &self,
        start: MapPoint,
        end: MapPoint,
    ) -> Result<Option<Route>, GatewayError> {
        let request = self
            .directions_request(start, end)
            .map_err(http::transport_error)?;
        let response = http::execute(&self.client, request).await?;
        let collection: FeatureCollection = http::into_json(response).await?;
        let route = collection.into_route();
        if route.is_none() {
            log::debug!("No path geometry in the response");
        }
        Ok(route)
    }
}
