mod error;
mod plan_walking_route;
mod resolve_address;
mod submit_report;
mod suggest_places;


pub use self::{
    error::Error, plan_walking_route::*, resolve_address::*, submit_report::*,
    suggest_places::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        entities::{geo::*, place::*, report::*, route::*},
        gateways::{geocode::*, report::*, routing::*},
        util::timeout::Deadline,
    };
}
