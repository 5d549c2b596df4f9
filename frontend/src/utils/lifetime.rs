use leptos::on_cleanup;
use std::{cell::Cell, rc::Rc};

/// Cancellation flag tied to a view. Async work checks it before applying
/// results so a torn-down view is never written to.
#[derive(Clone, Default, Debug)]
pub struct Lifetime {
    cancelled: Rc<Cell<bool>>,
}

impl Lifetime {
    pub fn new() -> Self {
        Self::default()
    }

    /// A lifetime that ends when the current reactive owner is cleaned up.
    pub fn bound_to_owner() -> Self {
        let lifetime = Self::new();
        let handle = lifetime.clone();
        on_cleanup(move || handle.cancel());
        lifetime
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    pub fn is_alive(&self) -> bool {
        !self.cancelled.get()
    }
}
