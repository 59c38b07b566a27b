use async_trait::async_trait;

use super::GatewayError;
use crate::entities::place::PlaceCandidate;

#[async_trait(?Send)]
pub trait GeoCodingGateway {
    /// Look up an address and return at most `limit` candidates,
    /// best match first.
    async fn search(&self, query: &str, limit: usize)
        -> Result<Vec<PlaceCandidate>, GatewayError>;
}
