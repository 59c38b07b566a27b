//! # walkmap-core
//!
//! The map interaction logic of walkmap: address lookups,
//! walking routes, live position tracking and the overlays
//! drawn for them on a map surface.
//!
//! Everything runs on a single thread. Network requests are
//! awaited cooperatively and never block the caller.

pub mod gateways;
pub mod map;
pub mod screen;
pub mod usecases;
pub mod util;

pub use walkmap_entities as entities;
