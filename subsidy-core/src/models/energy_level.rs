use std::fmt;

/// Energy-efficiency tier offered by the form's select control.
///
/// The form submits the bare code; unknown codes are still accepted by
/// validation and priced with the fallback rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyLevel {
    Tier1,
    Tier2,
}

impl EnergyLevel {
    pub const ALL: [EnergyLevel; 2] = [EnergyLevel::Tier1, EnergyLevel::Tier2];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Tier1 => "1",
            Self::Tier2 => "2",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Tier1),
            "2" => Some(Self::Tier2),
            _ => None,
        }
    }

    /// Option text for the select control.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Tier1 => "一级能效",
            Self::Tier2 => "二级能效",
        }
    }

    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.display_name() == name)
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
