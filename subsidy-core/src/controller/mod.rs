//! Submit handling and dialog routing for the subsidy form.
//!
//! [`FormController`] is built once with its view and pricing table and then
//! receives the form's user events: submit, clicks inside a dialog, key
//! presses and the privacy link.

mod guard;
mod view;

use tracing::{debug, info, warn};

pub use view::{ErrorView, FieldErrorLine, FormView, Highlight, ResultView};

use crate::{
    ClickTarget, DiscountQuote, Key, ModalKind, ModalManager, PricingCalculator,
    ValidationErrors, validate_application,
};
use guard::SubmitGuard;

/// How a submit ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the errors are rendered next to their fields.
    Rejected(ValidationErrors),
    /// The application was priced and the success dialog opened.
    Accepted(DiscountQuote),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

pub struct FormController<V: FormView> {
    view: V,
    pricing: PricingCalculator,
    modals: ModalManager,
}

impl<V: FormView> FormController<V> {
    pub fn new(
        view: V,
        pricing: PricingCalculator,
    ) -> Self {
        Self {
            view,
            pricing,
            modals: ModalManager::new(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn modals(&self) -> &ModalManager {
        &self.modals
    }

    pub fn pricing(&self) -> &PricingCalculator {
        &self.pricing
    }

    /// Validates the current input and either shows the errors or prices
    /// the application and opens the success dialog.
    ///
    /// Errors from a previous attempt are always cleared first, and the
    /// submit control is enabled again whichever way this returns.
    pub fn handle_submit(&mut self) -> SubmitOutcome {
        let mut view = SubmitGuard::new(&mut self.view);
        view.clear_errors();

        let input = view.read_input();
        let application = match validate_application(&input) {
            Ok(application) => application,
            Err(errors) => {
                warn!(count = errors.len(), "submission rejected");
                for error in &errors {
                    warn!(field = %error.field, %error, "validation error");
                }
                view.show_errors(&ErrorView::from(&errors));
                return SubmitOutcome::Rejected(errors);
            }
        };

        let quote = self
            .pricing
            .quote(application.price, &application.energy_code);
        info!(
            energy_code = %application.energy_code,
            original = %quote.original_price,
            discounted = %quote.discounted_price,
            "submission accepted"
        );

        view.show_result(&ResultView::from(&quote));
        self.modals.open(ModalKind::Success);
        view.set_modal_visible(ModalKind::Success, true);
        view.reset_fields();

        SubmitOutcome::Accepted(quote)
    }

    /// Opens the privacy policy dialog.
    pub fn open_privacy(&mut self) {
        self.modals.open(ModalKind::Privacy);
        self.view.set_modal_visible(ModalKind::Privacy, true);
    }

    /// Routes a click inside dialog `kind`.
    pub fn handle_modal_click(
        &mut self,
        kind: ModalKind,
        target: ClickTarget,
    ) {
        if self.modals.handle_click(kind, target) {
            self.view.set_modal_visible(kind, false);
        } else {
            debug!(modal = %kind, ?target, "click ignored");
        }
    }

    pub fn handle_key(
        &mut self,
        key: Key,
    ) {
        if let Some(kind) = self.modals.handle_key(key) {
            self.view.set_modal_visible(kind, false);
        }
    }
}
