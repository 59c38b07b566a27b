use thiserror::Error;

use crate::entities::geo::MapPoint;

pub type WatchId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    pub high_accuracy: bool,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("Permission to access the device position was denied")]
    PermissionDenied,
    #[error("The device position is unavailable")]
    Unavailable,
    #[error("Timed out while waiting for the device position")]
    Timeout,
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PositionUpdate {
    Fix(MapPoint),
    Failed(PositionError),
}

/// Continuous device position updates.
pub trait PositionSource {
    /// Start watching the device position.
    ///
    /// `on_update` is invoked for every fix or failure until
    /// the watch is cleared.
    fn watch(
        &self,
        options: WatchOptions,
        on_update: Box<dyn Fn(PositionUpdate)>,
    ) -> Result<WatchId, PositionError>;

    fn clear_watch(&self, id: WatchId);
}
