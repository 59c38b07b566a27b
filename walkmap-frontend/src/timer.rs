use std::time::Duration;

use futures::{future::LocalBoxFuture, FutureExt};
use walkmap_core::util::timeout::Timer;

/// Sleeps on the browser event loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        gloo_timers::future::sleep(duration).boxed_local()
    }
}
