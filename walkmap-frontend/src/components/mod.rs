mod address_input;
mod notice;
mod route_form;

pub use self::{address_input::*, notice::*, route_form::*};
