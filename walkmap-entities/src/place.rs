use crate::geo::MapPoint;

/// A result of an address lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCandidate {
    pub display_name: String,
    pub pos: MapPoint,
}
