use super::{prelude::*, resolve_address, Resolution};

#[derive(Debug, Clone, PartialEq)]
pub enum RoutePlan {
    /// At least one address is blank: nothing has been requested.
    Skipped,
    /// At least one address could not be resolved.
    AddressesNotFound,
    /// The routing service did not return a path.
    NoRoute,
    Found(Route),
}

/// Plan a walking route between two free-text addresses.
///
/// Both addresses are resolved concurrently. The routing
/// service is only asked if both of them could be resolved.
pub async fn plan_walking_route(
    geo: &dyn GeoCodingGateway,
    router: &dyn RoutingGateway,
    deadline: &Deadline,
    query: &RouteQuery,
) -> Result<RoutePlan> {
    if !query.is_complete() {
        return Ok(RoutePlan::Skipped);
    }
    let (start, end) = futures::join!(
        resolve_address(geo, deadline, &query.start),
        resolve_address(geo, deadline, &query.end),
    );
    let (Some(start), Some(end)) = (
        found_place(start, &query.start),
        found_place(end, &query.end),
    ) else {
        return Ok(RoutePlan::AddressesNotFound);
    };
    log::debug!(
        "Request walking route from {} to {}",
        start.display_name,
        end.display_name
    );
    let route = deadline
        .run(router.walking_route(start.pos, end.pos))
        .await??;
    match route {
        Some(route) if !route.is_empty() => {
            log::debug!(
                "Found walking route with {} points ({:.0} m)",
                route.path.len(),
                route.length()
            );
            Ok(RoutePlan::Found(route))
        }
        _ => Ok(RoutePlan::NoRoute),
    }
}

fn found_place(resolution: Result<Resolution>, address: &str) -> Option<PlaceCandidate> {
    match resolution {
        Ok(Resolution::Found(place)) => Some(place),
        Ok(Resolution::NotFound | Resolution::Skipped) => None,
        Err(err) => {
            log::warn!("Unable to resolve address '{address}': {err}");
            None
        }
    }
}
