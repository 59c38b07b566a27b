use super::prelude::*;

pub const MAX_SUGGESTIONS: usize = 5;

/// Look up places that match a partially typed address.
///
/// Blank input yields no suggestions without sending a request.
pub async fn suggest_places(
    geo: &dyn GeoCodingGateway,
    deadline: &Deadline,
    text: &str,
) -> Result<Vec<PlaceCandidate>> {
    let query = text.trim();
    if query.is_empty() {
        return Ok(vec![]);
    }
    let mut candidates = deadline.run(geo.search(query, MAX_SUGGESTIONS)).await??;
    candidates.truncate(MAX_SUGGESTIONS);
    log::debug!("Found {} suggestions for '{query}'", candidates.len());
    Ok(candidates)
}
