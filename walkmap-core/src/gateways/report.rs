use async_trait::async_trait;

use super::GatewayError;
use crate::entities::report::Report;

#[async_trait(?Send)]
pub trait ReportGateway {
    async fn submit(&self, report: &Report) -> Result<(), GatewayError>;
}
