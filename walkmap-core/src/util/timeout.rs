use std::{future::Future, rc::Rc, time::Duration};

use futures::future::{self, Either, LocalBoxFuture};
use thiserror::Error;

/// Runtime specific sleeping.
pub trait Timer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Timed out after {0:?}")]
pub struct Elapsed(pub Duration);

/// Resolve with the output of `fut` or fail with [`Elapsed`]
/// if the timer fires first.
pub async fn with_timeout<F>(
    timer: &dyn Timer,
    duration: Duration,
    fut: F,
) -> Result<F::Output, Elapsed>
where
    F: Future,
{
    let sleep = timer.sleep(duration);
    futures::pin_mut!(fut);
    match future::select(fut, sleep).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(Elapsed(duration)),
    }
}

/// Upper bound for every outbound request.
#[derive(Clone)]
pub struct Deadline {
    timer: Rc<dyn Timer>,
    duration: Duration,
}

impl Deadline {
    pub fn new(timer: Rc<dyn Timer>, duration: Duration) -> Self {
        Self { timer, duration }
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Elapsed>
    where
        F: Future,
    {
        with_timeout(&*self.timer, self.duration, fut).await
    }
}

impl std::fmt::Debug for Deadline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deadline")
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}
