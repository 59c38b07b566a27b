use time::OffsetDateTime;

use super::prelude::*;
use crate::entities::email::EmailAddress;

/// A report as entered by the user.
#[derive(Debug, Clone, Default)]
pub struct NewReport {
    pub lat: f64,
    pub lng: f64,
    pub category: String,
    pub description: String,
    pub photo: Option<String>,
    pub reporter_email: String,
    pub location_id: String,
    pub route_id: Option<String>,
}

fn required(value: String, name: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyField(name));
    }
    Ok(trimmed.to_string())
}

pub fn prepare_new_report(new_report: NewReport) -> Result<Report> {
    let NewReport {
        lat,
        lng,
        category,
        description,
        photo,
        reporter_email,
        location_id,
        route_id,
    } = new_report;
    let pos = MapPoint::try_from_lat_lng_deg(lat, lng)?;
    let category = required(category, "category")?;
    let description = required(description, "description")?;
    let location_id = required(location_id, "location")?;
    let reporter_email = reporter_email.parse::<EmailAddress>()?;
    let route_id = route_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());
    Ok(Report {
        pos,
        category,
        description,
        photo: photo.unwrap_or_default(),
        created_at: OffsetDateTime::now_utc(),
        reporter_email,
        location_id,
        route_id,
    })
}

/// Validate and submit a report.
pub async fn submit_report(
    gateway: &dyn ReportGateway,
    deadline: &Deadline,
    new_report: NewReport,
) -> Result<Report> {
    let report = prepare_new_report(new_report)?;
    deadline.run(gateway.submit(&report)).await??;
    log::info!(
        "Submitted '{}' report at {} for location {}",
        report.category,
        report.pos,
        report.location_id
    );
    Ok(report)
}
