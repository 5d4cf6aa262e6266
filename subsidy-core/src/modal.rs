//! Visibility state for the form's two dialogs.
//!
//! Each dialog is either closed or open and only changes on an explicit
//! action: a click on its close control, the privacy link, or Escape while
//! the success dialog is showing.

use std::fmt;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    /// Confirmation shown after an accepted submit.
    Success,
    /// Privacy policy text.
    Privacy,
}

impl fmt::Display for ModalKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Privacy => f.write_str("privacy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// What a click inside a dialog landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// An element marked as the dialog's close control (button or backdrop).
    CloseControl,
    /// Anything else inside the dialog.
    Content,
}

/// Keys the dialogs react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modal {
    kind: ModalKind,
    state: ModalState,
}

impl Modal {
    pub fn new(kind: ModalKind) -> Self {
        Self {
            kind,
            state: ModalState::Closed,
        }
    }

    pub fn kind(&self) -> ModalKind {
        self.kind
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == ModalState::Open
    }

    /// Value for the dialog's `aria-hidden` attribute.
    pub fn aria_hidden(&self) -> bool {
        !self.is_visible()
    }

    pub fn open(&mut self) {
        debug!(modal = %self.kind, "opening modal");
        self.state = ModalState::Open;
    }

    pub fn close(&mut self) {
        debug!(modal = %self.kind, "closing modal");
        self.state = ModalState::Closed;
    }
}

/// Owns both dialogs and routes input events to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalManager {
    success: Modal,
    privacy: Modal,
}

impl Default for ModalManager {
    fn default() -> Self {
        Self {
            success: Modal::new(ModalKind::Success),
            privacy: Modal::new(ModalKind::Privacy),
        }
    }
}

impl ModalManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        kind: ModalKind,
    ) -> &Modal {
        match kind {
            ModalKind::Success => &self.success,
            ModalKind::Privacy => &self.privacy,
        }
    }

    fn get_mut(
        &mut self,
        kind: ModalKind,
    ) -> &mut Modal {
        match kind {
            ModalKind::Success => &mut self.success,
            ModalKind::Privacy => &mut self.privacy,
        }
    }

    pub fn is_visible(
        &self,
        kind: ModalKind,
    ) -> bool {
        self.get(kind).is_visible()
    }

    pub fn open(
        &mut self,
        kind: ModalKind,
    ) {
        self.get_mut(kind).open();
    }

    pub fn close(
        &mut self,
        kind: ModalKind,
    ) {
        self.get_mut(kind).close();
    }

    /// Handles a click inside dialog `kind`. Returns `true` if it closed.
    pub fn handle_click(
        &mut self,
        kind: ModalKind,
        target: ClickTarget,
    ) -> bool {
        if target == ClickTarget::CloseControl && self.is_visible(kind) {
            self.close(kind);
            return true;
        }
        false
    }

    /// Handles a key press. Escape dismisses the success dialog only.
    /// Returns the dialog that closed, if any.
    pub fn handle_key(
        &mut self,
        key: Key,
    ) -> Option<ModalKind> {
        if key == Key::Escape && self.success.is_visible() {
            self.success.close();
            return Some(ModalKind::Success);
        }
        None
    }
}
