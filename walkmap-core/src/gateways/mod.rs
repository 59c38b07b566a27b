use thiserror::Error;

pub mod geocode;
pub mod position;
pub mod report;
pub mod routing;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Unexpected response status {0}")]
    Status(u16),
    #[error("Unexpected response: {0}")]
    Response(String),
}
