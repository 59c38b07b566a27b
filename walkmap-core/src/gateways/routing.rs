use async_trait::async_trait;

use super::GatewayError;
use crate::entities::{geo::MapPoint, route::Route};

#[async_trait(?Send)]
pub trait RoutingGateway {
    /// Request a walking path between two positions.
    ///
    /// `Ok(None)` means the service answered without any path geometry.
    async fn walking_route(
        &self,
        start: MapPoint,
        end: MapPoint,
    ) -> Result<Option<Route>, GatewayError>;
}
