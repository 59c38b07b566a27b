use crate::geo::{MapBbox, MapPoint};

/// Two free-text addresses to walk between.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteQuery {
    pub start: String,
    pub end: String,
}

impl RouteQuery {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Both addresses contain more than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.start.trim().is_empty() && !self.end.trim().is_empty()
    }
}

/// An ordered walking path, latitude first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    pub path: Vec<MapPoint>,
}

impl Route {
    pub const fn new(path: Vec<MapPoint>) -> Self {
        Self { path }
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn start(&self) -> Option<MapPoint> {
        self.path.first().copied()
    }

    pub fn end(&self) -> Option<MapPoint> {
        self.path.last().copied()
    }

    pub fn bbox(&self) -> Option<MapBbox> {
        MapBbox::from_points(self.path.iter().copied())
    }

    /// Length of the path in meters.
    pub fn length(&self) -> f64 {
        self.path
            .windows(2)
            .map(|leg| leg[0].distance_to(leg[1]))
            .sum()
    }
}
