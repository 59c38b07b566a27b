//! # walkmap-gateways
//!
//! HTTP clients of the services walkmap depends on.

mod http;
pub mod nominatim;
pub mod openrouteservice;
pub mod report_api;

pub use self::{nominatim::Nominatim, openrouteservice::OpenRouteService, report_api::ReportApi};

/// Build a client that identifies itself with the given user agent.
///
/// Public services like Nominatim reject anonymous requests.
#[cfg(not(target_arch = "wasm32"))]
pub fn client_with_user_agent(
    user_agent: &str,
) -> Result<reqwest::Client, walkmap_core::gateways::GatewayError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(http::transport_error)
}

fn trim_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
