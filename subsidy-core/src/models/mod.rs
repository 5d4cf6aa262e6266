mod energy_level;
mod field;
mod subsidy_form;

pub use energy_level::EnergyLevel;
pub use field::Field;
pub use subsidy_form::SubsidyFormInput;
