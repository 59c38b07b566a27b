use std::time::Duration;

use futures::{future::LocalBoxFuture, FutureExt};
use walkmap_core::util::timeout::Timer;

/// Sleeps on the tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed_local()
    }
}
