use super::*;
use time::format_description::well_known::Rfc3339;
use walkmap_entities as e;

#[derive(Debug, thiserror::Error)]
pub enum PlaceResultError {
    #[error("Invalid latitude '{0}'")]
    Lat(String),
    #[error("Invalid longitude '{0}'")]
    Lng(String),
    #[error(transparent)]
    Coordinate(#[from] e::geo::InvalidCoordinate),
}

impl TryFrom<PlaceResult> for e::place::PlaceCandidate {
    type Error = PlaceResultError;
    fn try_from(from: PlaceResult) -> Result<Self, Self::Error> {
        let PlaceResult {
            display_name,
            lat,
            lon,
        } = from;
        let lat_deg = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| PlaceResultError::Lat(lat.clone()))?;
        let lng_deg = lon
            .trim()
            .parse::<f64>()
            .map_err(|_| PlaceResultError::Lng(lon.clone()))?;
        let pos = e::geo::MapPoint::try_from_lat_lng_deg(lat_deg, lng_deg)?;
        Ok(Self { display_name, pos })
    }
}

impl FeatureCollection {
    /// The path of the first feature, latitude first.
    ///
    /// Positions with less than two values or outside
    /// of the valid range are dropped.
    /// Returns `None` if no usable point is left.
    pub fn into_route(self) -> Option<e::route::Route> {
        let feature = self.features.into_iter().next()?;
        let path: Vec<_> = feature
            .geometry
            .coordinates
            .into_iter()
            .filter_map(|position| match position.as_slice() {
                [lng, lat, ..] => {
                    let pos = e::geo::MapPoint::from_lat_lng_deg(*lat, *lng);
                    if pos.is_valid() {
                        Some(pos)
                    } else {
                        log::warn!("Dropping invalid route position {position:?}");
                        None
                    }
                }
                _ => {
                    log::warn!("Dropping incomplete route position {position:?}");
                    None
                }
            })
            .collect();
        if path.is_empty() {
            return None;
        }
        Some(e::route::Route::new(path))
    }
}

impl From<&e::report::Report> for ReportRecord {
    fn from(from: &e::report::Report) -> Self {
        let e::report::Report {
            pos,
            category,
            description,
            photo,
            created_at,
            reporter_email,
            location_id,
            route_id,
        } = from;
        let (longitude, latitude) = pos.to_lng_lat();
        Self {
            longitude,
            latitude,
            type_problem: category.clone(),
            description: description.clone(),
            photo: photo.clone(),
            // RFC 3339 formatting only fails for years beyond 9999
            date_creation: created_at.format(&Rfc3339).unwrap_or_default(),
            email_user: reporter_email.as_str().to_owned(),
            id_lieu: location_id.clone(),
            id_itineraire: route_id.clone(),
        }
    }
}
