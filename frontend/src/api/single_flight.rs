use futures::future::{FutureExt, LocalBoxFuture, Shared};
use std::{cell::RefCell, future::Future, rc::Rc};

pub type SharedTask<T> = Shared<LocalBoxFuture<'static, T>>;

/// Coalesces concurrent callers onto one pending operation. The slot is
/// cleared as soon as the operation settles, so the next call starts fresh.
pub struct SingleFlight<T: Clone + 'static> {
    slot: Rc<RefCell<Option<SharedTask<T>>>>,
}

impl<T: Clone + 'static> Clone for SingleFlight<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: Clone + 'static> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
        }
    }
}

impl<T: Clone + 'static> SingleFlight<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Joins the pending operation, or starts one with `start` when idle.
    pub fn run<F, Fut>(&self, start: F) -> SharedTask<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + 'static,
    {
        if let Some(task) = self.slot.borrow().as_ref() {
            log::debug!("joining in-flight operation");
            return task.clone();
        }
        let slot = Rc::clone(&self.slot);
        let work = start();
        let task = async move {
            let output = work.await;
            slot.borrow_mut().take();
            output
        }
        .boxed_local()
        .shared();
        *self.slot.borrow_mut() = Some(task.clone());
        task
    }
}
