use async_trait::async_trait;
use reqwest::{Client, Request};
use walkmap_boundary::ReportRecord;
use walkmap_core::{
    entities::report::Report,
    gateways::{report::ReportGateway, GatewayError},
};

use crate::{http, trim_base_url};

/// The report submission endpoint.
#[derive(Debug, Clone)]
pub struct ReportApi {
    client: Client,
    base_url: String,
}

impl ReportApi {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base_url(base_url.into()),
        }
    }

    fn submit_request(&self, report: &Report) -> reqwest::Result<Request> {
        self.client
            .post(format!("{}/api/v1/reports", self.base_url))
            .json(&ReportRecord::from(report))
            .build()
    }
}

#[async_trait(?Send)]
impl ReportGateway for ReportApi {
    async fn submit(&self, report: &Report) -> Result<(), GatewayError> {
        let request = self
            .submit_request(report)
            .map_err(http::transport_error)?;
        http::execute(&self.client, request).await?;
        Ok(())
    }
}
