use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifiers for the inputs of the subsidy application form.
///
/// Declaration order matches the on-screen order, so ordered collections
/// keyed by `Field` list errors top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "phone")]
    Phone,
    #[serde(rename = "idCard")]
    IdCard,
    #[serde(rename = "energyLevel")]
    EnergyLevel,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "address")]
    Address,
    #[serde(rename = "agreePrivacy")]
    AgreePrivacy,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Phone,
        Field::IdCard,
        Field::EnergyLevel,
        Field::Price,
        Field::Address,
        Field::AgreePrivacy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::IdCard => "idCard",
            Self::EnergyLevel => "energyLevel",
            Self::Price => "price",
            Self::Address => "address",
            Self::AgreePrivacy => "agreePrivacy",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }

    /// Label shown next to the control.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "姓名",
            Self::Phone => "手机号码",
            Self::IdCard => "身份证号",
            Self::EnergyLevel => "能效类型",
            Self::Price => "全国统一价",
            Self::Address => "详细地址",
            Self::AgreePrivacy => "隐私政策",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
