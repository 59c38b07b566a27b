#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # walkmap-entities
//!
//! Reusable, agnostic domain entities for walkmap.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod email;
pub mod geo;
pub mod place;
pub mod report;
pub mod route;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
