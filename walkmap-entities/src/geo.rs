use std::fmt;

use thiserror::Error;

/// Mean earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

const LAT_DEG_MAX: f64 = 90.0;
const LNG_DEG_MAX: f64 = 180.0;

/// Latitude in degrees (WGS84).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct LatCoord(f64);

impl LatCoord {
    pub const fn min() -> Self {
        Self(-LAT_DEG_MAX)
    }

    pub const fn max() -> Self {
        Self(LAT_DEG_MAX)
    }

    pub const fn from_deg(deg: f64) -> Self {
        Self(deg)
    }

    pub const fn to_deg(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self >= Self::min() && self <= Self::max()
    }
}

/// Longitude in degrees (WGS84).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct LngCoord(f64);

impl LngCoord {
    pub const fn min() -> Self {
        Self(-LNG_DEG_MAX)
    }

    pub const fn max() -> Self {
        Self(LNG_DEG_MAX)
    }

    pub const fn from_deg(deg: f64) -> Self {
        Self(deg)
    }

    pub const fn to_deg(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self >= Self::min() && self <= Self::max()
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Invalid coordinate: lat = {lat}, lng = {lng}")]
pub struct InvalidCoordinate {
    pub lat: f64,
    pub lng: f64,
}

/// A position on the map, latitude first.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MapPoint {
    lat: LatCoord,
    lng: LngCoord,
}

impl MapPoint {
    pub const fn new(lat: LatCoord, lng: LngCoord) -> Self {
        Self { lat, lng }
    }

    pub const fn from_lat_lng_deg(lat: f64, lng: f64) -> Self {
        Self::new(LatCoord::from_deg(lat), LngCoord::from_deg(lng))
    }

    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        let pos = Self::from_lat_lng_deg(lat, lng);
        if pos.is_valid() {
            Ok(pos)
        } else {
            Err(InvalidCoordinate { lat, lng })
        }
    }

    pub const fn lat(self) -> LatCoord {
        self.lat
    }

    pub const fn lng(self) -> LngCoord {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_valid() && self.lng.is_valid()
    }

    /// Longitude first, as expected by GeoJSON based services.
    pub const fn to_lng_lat(self) -> (f64, f64) {
        (self.lng.to_deg(), self.lat.to_deg())
    }

    /// Great-circle distance in meters (haversine).
    pub fn distance_to(self, other: Self) -> f64 {
        let lat1 = self.lat.to_deg().to_radians();
        let lat2 = other.lat.to_deg().to_radians();
        let dlat = (other.lat.to_deg() - self.lat.to_deg()).to_radians();
        let dlng = (other.lng.to_deg() - self.lng.to_deg()).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat.to_deg(), self.lng.to_deg())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBbox {
    sw: MapPoint,
    ne: MapPoint,
}

impl MapBbox {
    pub const fn new(sw: MapPoint, ne: MapPoint) -> Self {
        Self { sw, ne }
    }

    /// The smallest box that covers all points.
    ///
    /// Points on both sides of the antimeridian result in a box that
    /// crosses it (`southwest().lng() > northeast().lng()`) if that box
    /// is narrower than the one spanning the prime meridian.
    ///
    /// Returns `None` if there are no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = MapPoint>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (mut min_lat, mut min_lng) = (first.lat.to_deg(), first.lng.to_deg());
        let (mut max_lat, mut max_lng) = (min_lat, min_lng);
        // smallest eastern and largest western longitude
        let mut min_east_lng: Option<f64> = None;
        let mut max_west_lng: Option<f64> = None;
        for p in std::iter::once(first).chain(points) {
            let (lat, lng) = (p.lat.to_deg(), p.lng.to_deg());
            min_lat = min_lat.min(lat);
            max_lat = max_lat.max(lat);
            min_lng = min_lng.min(lng);
            max_lng = max_lng.max(lng);
            if lng >= 0.0 {
                min_east_lng = Some(min_east_lng.map_or(lng, |x| x.min(lng)));
            } else {
                max_west_lng = Some(max_west_lng.map_or(lng, |x| x.max(lng)));
            }
        }
        if let (Some(west), Some(east)) = (min_east_lng, max_west_lng) {
            let crossing_width = east + 2.0 * LNG_DEG_MAX - west;
            if crossing_width < max_lng - min_lng {
                min_lng = west;
                max_lng = east;
            }
        }
        Some(Self::new(
            MapPoint::from_lat_lng_deg(min_lat, min_lng),
            MapPoint::from_lat_lng_deg(max_lat, max_lng),
        ))
    }

    pub fn crosses_antimeridian(&self) -> bool {
        self.sw.lng > self.ne.lng
    }

    pub const fn southwest(&self) -> MapPoint {
        self.sw
    }

    pub const fn northeast(&self) -> MapPoint {
        self.ne
    }

    pub fn is_valid(&self) -> bool {
        self.sw.is_valid() && self.ne.is_valid() && self.sw.lat <= self.ne.lat
    }

    pub fn contains_point(&self, pos: MapPoint) -> bool {
        let lat_ok = pos.lat >= self.sw.lat && pos.lat <= self.ne.lat;
        let lng_ok = if self.crosses_antimeridian() {
            pos.lng >= self.sw.lng || pos.lng <= self.ne.lng
        } else {
            pos.lng >= self.sw.lng && pos.lng <= self.ne.lng
        };
        lat_ok && lng_ok
    }

    pub fn center(&self) -> MapPoint {
        let (west, mut east) = (self.sw.lng.to_deg(), self.ne.lng.to_deg());
        if self.crosses_antimeridian() {
            east += 2.0 * LNG_DEG_MAX;
        }
        let mut lng = (west + east) / 2.0;
        if lng > LNG_DEG_MAX {
            lng -= 2.0 * LNG_DEG_MAX;
        }
        MapPoint::from_lat_lng_deg((self.sw.lat.to_deg() + self.ne.lat.to_deg()) / 2.0, lng)
    }
}
