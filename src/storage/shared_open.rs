//! One in-flight open shared by every caller

use std::cell::RefCell;
use std::future::Future;

use futures::future::{FutureExt, LocalBoxFuture, Shared};

use super::StoreResult;

type Opening<T> = Shared<LocalBoxFuture<'static, StoreResult<T>>>;

/// Lazily opened handle. Callers that arrive while the open is still
/// pending await the same future; a failed open is retried by the next call.
pub struct SharedOpen<T: Clone + 'static> {
    opening: RefCell<Option<Opening<T>>>,
}

impl<T: Clone + 'static> Default for SharedOpen<T> {
    fn default() -> Self {
        Self { opening: RefCell::new(None) }
    }
}

impl<T: Clone + 'static> SharedOpen<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_open<F, Fut>(&self, open: F) -> StoreResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = StoreResult<T>> + 'static,
    {
        let opening = {
            let mut slot = self.opening.borrow_mut();
            slot.get_or_insert_with(|| open().boxed_local().shared()).clone()
        };
        let result = opening.await;
        if result.is_err() {
            self.opening.borrow_mut().take();
        }
        result
    }
}
