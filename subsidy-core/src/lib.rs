pub mod calculations;
pub mod controller;
pub mod modal;
pub mod models;
pub mod validation;

pub use calculations::{DiscountQuote, PricingCalculator, PricingTable, PricingTableError, Tier};
pub use controller::{ErrorView, FormController, FormView, ResultView, SubmitOutcome};
pub use modal::{ClickTarget, Key, Modal, ModalKind, ModalManager, ModalState};
pub use models::*;
pub use validation::{
    FieldError, FieldErrorKind, ValidatedApplication, ValidationErrors, validate,
    validate_application,
};
