use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::task::{JoinError, JoinHandle};

/// Join handle that aborts its task when dropped.
///
/// Awaiting the guard awaits the task. Dropping it before the task is done
/// (e.g. the request future owning it was dropped) aborts the task, so
/// spawned work never outlives whoever spawned it.
pub struct AbortGuard<T> {
    handle: JoinHandle<T>,
}

impl<T> AbortGuard<T> {
    pub fn new(handle: JoinHandle<T>) -> Self {
        Self { handle }
    }
}

impl<T> Future for AbortGuard<T> {
    type Output = Result<T, JoinError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx)
    }
}

impl<T> Drop for AbortGuard<T> {
    fn drop(&mut self) {
        // no-op once the task has finished
        self.handle.abort();
    }
}
