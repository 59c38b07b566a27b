use super::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Blank input: nothing has been requested.
    Skipped,
    Found(PlaceCandidate),
    NotFound,
}

/// Resolve an address to the best matching place.
pub async fn resolve_address(
    geo: &dyn GeoCodingGateway,
    deadline: &Deadline,
    address: &str,
) -> Result<Resolution> {
    let query = address.trim();
    if query.is_empty() {
        return Ok(Resolution::Skipped);
    }
    let candidates = deadline.run(geo.search(query, 1)).await??;
    let Some(place) = candidates.into_iter().next() else {
        log::debug!("No location found for '{query}'");
        return Ok(Resolution::NotFound);
    };
    log::debug!("Resolved '{query}' to {}", place.pos);
    Ok(Resolution::Found(place))
}
