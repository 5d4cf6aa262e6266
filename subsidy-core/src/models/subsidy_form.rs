use serde::{Deserialize, Serialize};

/// Raw values read from the form for a single submit.
///
/// Values are kept exactly as typed; trimming and parsing happen during
/// validation so the error messages can distinguish blank from malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsidyFormInput {
    pub name: String,
    pub phone: String,
    pub id_card: String,
    pub energy_level: String,
    pub price: String,
    pub address: String,
    pub agree_privacy: bool,
}
