//! In-memory state behind the subsidy form window.
//!
//! The gpui form copies its controls into a [`FormState`] before each submit
//! and renders from it afterwards, so every decision the controller makes is
//! visible here without a running window.

use subsidy_core::{ErrorView, Field, FormView, ModalKind, ResultView, SubsidyFormInput};

#[derive(Debug, Clone)]
pub struct FormState {
    input: SubsidyFormInput,
    submit_enabled: bool,
    errors: ErrorView,
    result: Option<ResultView>,
    success_visible: bool,
    privacy_visible: bool,
    reset_requested: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            input: SubsidyFormInput::default(),
            submit_enabled: true,
            errors: ErrorView::default(),
            result: None,
            success_visible: false,
            privacy_visible: false,
            reset_requested: false,
        }
    }
}

impl FormState {
    /// Stores the values read from the on-screen controls.
    pub fn set_input(
        &mut self,
        input: SubsidyFormInput,
    ) {
        self.input = input;
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn errors(&self) -> &ErrorView {
        &self.errors
    }

    pub fn error_for(
        &self,
        field: Field,
    ) -> Option<&'static str> {
        self.errors.message_for(field)
    }

    pub fn result(&self) -> Option<&ResultView> {
        self.result.as_ref()
    }

    pub fn is_modal_visible(
        &self,
        kind: ModalKind,
    ) -> bool {
        match kind {
            ModalKind::Success => self.success_visible,
            ModalKind::Privacy => self.privacy_visible,
        }
    }

    /// Returns `true` once after the controller asked for the fields to be
    /// emptied. The window then rebuilds its controls.
    pub fn take_reset_request(&mut self) -> bool {
        std::mem::take(&mut self.reset_requested)
    }
}

impl FormView for FormState {
    fn read_input(&self) -> SubsidyFormInput {
        self.input.clone()
    }

    fn set_submit_enabled(
        &mut self,
        enabled: bool,
    ) {
        self.submit_enabled = enabled;
    }

    fn clear_errors(&mut self) {
        self.errors = ErrorView::default();
    }

    fn show_errors(
        &mut self,
        errors: &ErrorView,
    ) {
        self.errors = errors.clone();
    }

    fn show_result(
        &mut self,
        result: &ResultView,
    ) {
        self.result = Some(result.clone());
    }

    fn reset_fields(&mut self) {
        self.input = SubsidyFormInput::default();
        self.reset_requested = true;
    }

    fn set_modal_visible(
        &mut self,
        kind: ModalKind,
        visible: bool,
    ) {
        match kind {
            ModalKind::Success => self.success_visible = visible,
            ModalKind::Privacy => self.privacy_visible = visible,
        }
    }
}
