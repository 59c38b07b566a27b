use std::time::Duration;

use thiserror::Error;

use crate::{
    entities::{email::EmailAddressParseError, geo::InvalidCoordinate},
    gateways::GatewayError,
    util::timeout::Elapsed,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("The request timed out after {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Coordinate(#[from] InvalidCoordinate),
    #[error("Invalid email address")]
    Email,
    #[error("Missing {0}")]
    EmptyField(&'static str),
}

impl From<Elapsed> for Error {
    fn from(Elapsed(duration): Elapsed) -> Self {
        Self::Timeout(duration)
    }
}

impl From<EmailAddressParseError> for Error {
    fn from(_: EmailAddressParseError) -> Self {
        Self::Email
    }
}
