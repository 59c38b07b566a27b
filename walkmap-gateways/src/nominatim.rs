use async_trait::async_trait;
use reqwest::{Client, Request};
use walkmap_boundary::PlaceResult;
use walkmap_core::{
    entities::place::PlaceCandidate,
    gateways::{geocode::GeoCodingGateway, GatewayError},
};

use crate::{http, trim_base_url};

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Address lookup with a Nominatim server.
#[derive(Debug, Clone)]
pub struct Nominatim {
    client: Client,
    base_url: String,
}

impl Nominatim {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base_url(base_url.into()),
        }
    }

    fn search_request(&self, query: &str, limit: usize) -> reqwest::Result<Request> {
        let limit = limit.to_string();
        self.client
            .get(format!("{}/search", self.base_url))
            .query(&[("format", "json"), ("q", query), ("limit", limit.as_str())])
            .build()
    }
}

#[async_trait(?Send)]
impl GeoCodingGateway for Nominatim {
    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<PlaceCandidate>, GatewayError> {
        let request = self
            .search_request(query, limit)
            .map_err(http::transport_error)?;
        let response = http::execute(&self.client, request).await?;
        let results: Vec<PlaceResult> = http::into_json(response).await?;
        Ok(into_candidates(results, limit))
    }
}

fn into_candidates(results: Vec<PlaceResult>, limit: usize) -> Vec<PlaceCandidate> {
    results
        .into_iter()
        .filter_map(|result| {
            PlaceCandidate::try_from(result)
                .map_err(|err| log::warn!("Skip invalid address lookup result: {err}"))
                .ok()
        })
        .take(limit)
        .collect()
}
