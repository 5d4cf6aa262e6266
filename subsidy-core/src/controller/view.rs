use crate::{
    DiscountQuote, Field, ModalKind, SubsidyFormInput, ValidationErrors,
    calculations::common::format_money,
};

/// The surface a [`FormController`](super::FormController) drives.
///
/// Implementations hold references to the actual controls; the controller
/// never touches a toolkit directly.
pub trait FormView {
    /// Snapshot of the current field values.
    fn read_input(&self) -> SubsidyFormInput;

    fn set_submit_enabled(
        &mut self,
        enabled: bool,
    );

    /// Removes every inline error message and highlight.
    fn clear_errors(&mut self);

    fn show_errors(
        &mut self,
        errors: &ErrorView,
    );

    fn show_result(
        &mut self,
        result: &ResultView,
    );

    /// Empties every field, unticks the privacy box and clears the select.
    fn reset_fields(&mut self);

    fn set_modal_visible(
        &mut self,
        kind: ModalKind,
        visible: bool,
    );
}

/// Which container gets the error highlight for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// The labelled group around an ordinary input.
    FieldGroup,
    /// The row holding the privacy checkbox and link.
    AgreeRow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrorLine {
    pub field: Field,
    pub message: &'static str,
    pub highlight: Highlight,
}

/// Render-ready inline errors, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorView {
    lines: Vec<FieldErrorLine>,
}

impl ErrorView {
    pub fn lines(&self) -> &[FieldErrorLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn message_for(
        &self,
        field: Field,
    ) -> Option<&'static str> {
        self.lines
            .iter()
            .find(|l| l.field == field)
            .map(|l| l.message)
    }

    pub fn is_highlighted(
        &self,
        highlight: Highlight,
        field: Field,
    ) -> bool {
        self.lines
            .iter()
            .any(|l| l.field == field && l.highlight == highlight)
    }
}

impl From<&ValidationErrors> for ErrorView {
    fn from(errors: &ValidationErrors) -> Self {
        let lines = errors
            .iter()
            .map(|e| FieldErrorLine {
                field: e.field,
                message: e.message,
                highlight: match e.field {
                    Field::AgreePrivacy => Highlight::AgreeRow,
                    _ => Highlight::FieldGroup,
                },
            })
            .collect();
        Self { lines }
    }
}

/// Read-only values shown in the success dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultView {
    pub energy_label: String,
    pub original_price: String,
    pub discounted_price: String,
}

impl From<&DiscountQuote> for ResultView {
    fn from(quote: &DiscountQuote) -> Self {
        Self {
            energy_label: quote.label.clone(),
            original_price: format_money(quote.original_price),
            discounted_price: format_money(quote.discounted_price),
        }
    }
}
