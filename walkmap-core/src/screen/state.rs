use std::fmt;

use crate::entities::{geo::MapPoint, place::PlaceCandidate, route::Route};

/// The input fields that offer address suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionField {
    Search,
    Start,
    End,
}

/// Requests of the same kind overtake each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Search,
    Suggest(SuggestionField),
    Route,
}

/// A message for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AddressNotFound,
    AddressesNotFound,
    NoRouteFound,
    SearchFailed,
    RouteFailed,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::AddressNotFound => "Address not found",
            Self::AddressesNotFound => "Start or destination address not found",
            Self::NoRouteFound => "No route found",
            Self::SearchFailed => "The address search is currently not available",
            Self::RouteFailed => "The route could not be calculated",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenState {
    /// A route is being calculated.
    pub loading: bool,
    pub notice: Option<Notice>,
    pub search_suggestions: Vec<PlaceCandidate>,
    pub start_suggestions: Vec<PlaceCandidate>,
    pub end_suggestions: Vec<PlaceCandidate>,
    /// The route that is currently displayed.
    pub route: Option<Route>,
    /// The last known device position.
    pub position: Option<MapPoint>,
}

impl ScreenState {
    pub fn suggestions(&self, field: SuggestionField) -> &[PlaceCandidate] {
        match field {
            SuggestionField::Search => &self.search_suggestions,
            SuggestionField::Start => &self.start_suggestions,
            SuggestionField::End => &self.end_suggestions,
        }
    }

    pub fn suggestions_mut(&mut self, field: SuggestionField) -> &mut Vec<PlaceCandidate> {
        match field {
            SuggestionField::Search => &mut self.search_suggestions,
            SuggestionField::Start => &mut self.start_suggestions,
            SuggestionField::End => &mut self.end_suggestions,
        }
    }
}
