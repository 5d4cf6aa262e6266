use std::ops::{Deref, DerefMut};

use super::FormView;

/// Keeps the submit control disabled while a submit is being handled.
///
/// The control is re-enabled when the guard drops, on every return path.
pub(crate) struct SubmitGuard<'a, V: FormView> {
    view: &'a mut V,
}

impl<'a, V: FormView> SubmitGuard<'a, V> {
    pub(crate) fn new(view: &'a mut V) -> Self {
        view.set_submit_enabled(false);
        Self { view }
    }
}

impl<V: FormView> Deref for SubmitGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.view
    }
}

impl<V: FormView> DerefMut for SubmitGuard<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.view
    }
}

impl<V: FormView> Drop for SubmitGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_submit_enabled(true);
    }
}
