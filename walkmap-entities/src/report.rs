use time::OffsetDateTime;

use crate::{email::EmailAddress, geo::MapPoint};

/// A problem reported at a location.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub pos: MapPoint,
    pub category: String,
    pub description: String,
    /// Placeholder until photo uploads exist.
    pub photo: String,
    pub created_at: OffsetDateTime,
    pub reporter_email: EmailAddress,
    pub location_id: String,
    pub route_id: Option<String>,
}
