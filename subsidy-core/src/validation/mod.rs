//! Field validation for the subsidy application form.
//!
//! [`validate`] checks every field independently and collects one
//! [`FieldError`] per failing field. It never fails itself: unparseable
//! prices are reported as field errors like any other bad input.

use std::{
    collections::{BTreeMap, btree_map},
    sync::LazyLock,
};

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{Field, SubsidyFormInput, calculations::common::parse_amount};

const NAME_MIN_CHARS: usize = 2;
const ADDRESS_MIN_CHARS: usize = 5;

// Mainland mobile numbers: 1, then 3-9, then nine more digits.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9][0-9]{9}$").expect("phone pattern is valid"));

// Resident ID: legacy 15-digit form, or 17 digits plus a check character.
static ID_CARD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]{15}|[0-9]{17}[0-9Xx])$").expect("id card pattern is valid")
});

/// Category of a field failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Blank or absent value.
    Missing,
    /// Fewer characters than the field minimum, after trimming.
    TooShort { min_chars: usize },
    /// Value does not match the phone or ID card format.
    PatternMismatch,
    /// Price that is unparseable, zero or negative.
    InvalidAmount,
    /// The privacy policy box is not ticked.
    NotAccepted,
}

/// A single field failure, displayed as the message shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
    pub message: &'static str,
}

impl FieldError {
    fn new(
        field: Field,
        kind: FieldErrorKind,
    ) -> Self {
        Self {
            field,
            kind,
            message: message_for(field, kind),
        }
    }
}

fn message_for(
    field: Field,
    kind: FieldErrorKind,
) -> &'static str {
    use FieldErrorKind::*;

    match (field, kind) {
        (Field::Name, Missing) => "请输入姓名",
        (Field::Name, _) => "姓名长度至少为 2 个字符",
        (Field::Phone, Missing) => "请输入手机号码",
        (Field::Phone, _) => "请输入有效的中国大陆手机号码",
        (Field::IdCard, Missing) => "请输入身份证号",
        (Field::IdCard, _) => "身份证号格式不正确",
        (Field::EnergyLevel, _) => "请选择能效类型",
        (Field::Price, Missing) => "请输入全国统一价",
        (Field::Price, _) => "请输入大于 0 的有效金额",
        (Field::Address, Missing) => "请输入详细地址",
        (Field::Address, _) => "详细地址至少为 5 个字符",
        (Field::AgreePrivacy, _) => "请勾选确认已阅读并同意隐私政策",
    }
}

/// Failures keyed by field. An absent key means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(
        &self,
        field: Field,
    ) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn contains(
        &self,
        field: Field,
    ) -> bool {
        self.errors.contains_key(&field)
    }

    /// Errors in on-screen field order.
    pub fn iter(&self) -> btree_map::Values<'_, Field, FieldError> {
        self.errors.values()
    }

    fn push(
        &mut self,
        field: Field,
        kind: FieldErrorKind,
    ) {
        self.errors.insert(field, FieldError::new(field, kind));
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = btree_map::Values<'a, Field, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Input that passed every check, with the price already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedApplication {
    pub energy_code: String,
    pub price: Decimal,
}

/// Validates every field of `input`.
pub fn validate(input: &SubsidyFormInput) -> ValidationErrors {
    run_checks(input).0
}

/// Validates `input` and hands back the values pricing needs.
pub fn validate_application(
    input: &SubsidyFormInput,
) -> Result<ValidatedApplication, ValidationErrors> {
    match run_checks(input) {
        (errors, Some(price)) if errors.is_valid() => Ok(ValidatedApplication {
            energy_code: input.energy_level.trim().to_string(),
            price,
        }),
        (errors, _) => Err(errors),
    }
}

fn run_checks(input: &SubsidyFormInput) -> (ValidationErrors, Option<Decimal>) {
    let mut errors = ValidationErrors::default();

    if let Err(kind) = check_min_chars(&input.name, NAME_MIN_CHARS) {
        errors.push(Field::Name, kind);
    }
    if let Err(kind) = check_pattern(&input.phone, &PHONE_PATTERN) {
        errors.push(Field::Phone, kind);
    }
    if let Err(kind) = check_pattern(&input.id_card, &ID_CARD_PATTERN) {
        errors.push(Field::IdCard, kind);
    }
    if input.energy_level.trim().is_empty() {
        errors.push(Field::EnergyLevel, FieldErrorKind::Missing);
    }
    let price = match check_price(&input.price) {
        Ok(price) => Some(price),
        Err(kind) => {
            errors.push(Field::Price, kind);
            None
        }
    };
    if let Err(kind) = check_min_chars(&input.address, ADDRESS_MIN_CHARS) {
        errors.push(Field::Address, kind);
    }
    if !input.agree_privacy {
        errors.push(Field::AgreePrivacy, FieldErrorKind::NotAccepted);
    }

    (errors, price)
}

fn check_min_chars(
    value: &str,
    min_chars: usize,
) -> Result<(), FieldErrorKind> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FieldErrorKind::Missing)
    } else if trimmed.chars().count() < min_chars {
        Err(FieldErrorKind::TooShort { min_chars })
    } else {
        Ok(())
    }
}

fn check_pattern(
    value: &str,
    pattern: &Regex,
) -> Result<(), FieldErrorKind> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FieldErrorKind::Missing)
    } else if !pattern.is_match(trimmed) {
        Err(FieldErrorKind::PatternMismatch)
    } else {
        Ok(())
    }
}

// Only a truly empty price counts as missing; whitespace is an invalid amount.
fn check_price(value: &str) -> Result<Decimal, FieldErrorKind> {
    if value.is_empty() {
        return Err(FieldErrorKind::Missing);
    }
    match parse_amount(value) {
        Ok(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err(FieldErrorKind::InvalidAmount),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn valid_input() -> SubsidyFormInput {
        SubsidyFormInput {
            name: "张三".to_string(),
            phone: "13800138000".to_string(),
            id_card: "110101199003077777".to_string(),
            energy_level: "1".to_string(),
            price: "1999.5".to_string(),
            address: "北京市东城区示例路 1 号".to_string(),
            agree_privacy: true,
        }
    }

    fn kind_of(
        input: &SubsidyFormInput,
        field: Field,
    ) -> Option<FieldErrorKind> {
        validate(input).get(field).map(|e| e.kind)
    }

    #[test]
    fn valid_input_has_no_errors() {
        let errors = validate(&valid_input());

        assert!(errors.is_valid());
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn empty_input_reports_every_field_in_form_order() {
        let errors = validate(&SubsidyFormInput::default());

        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, Field::ALL.to_vec());
        assert_eq!(errors.get(Field::Name).unwrap().message, "请输入姓名");
        assert_eq!(
            errors.get(Field::AgreePrivacy).unwrap().kind,
            FieldErrorKind::NotAccepted
        );
    }

    // =========================================================================
    // name / address
    // =========================================================================

    #[test]
    fn name_shorter_than_two_chars_is_too_short() {
        let input = SubsidyFormInput {
            name: " 张 ".to_string(),
            ..valid_input()
        };

        assert_eq!(
            kind_of(&input, Field::Name),
            Some(FieldErrorKind::TooShort { min_chars: 2 })
        );
        assert_eq!(
            validate(&input).get(Field::Name).unwrap().to_string(),
            "姓名长度至少为 2 个字符"
        );
    }

    #[test]
    fn whitespace_name_is_missing() {
        let input = SubsidyFormInput {
            name: "   ".to_string(),
            ..valid_input()
        };

        assert_eq!(kind_of(&input, Field::Name), Some(FieldErrorKind::Missing));
    }

    #[test]
    fn address_counts_characters_not_bytes() {
        let short = SubsidyFormInput {
            address: "北京市东城".to_string(),
            ..valid_input()
        };
        let too_short = SubsidyFormInput {
            address: "北京市东".to_string(),
            ..valid_input()
        };

        assert_eq!(kind_of(&short, Field::Address), None);
        assert_eq!(
            kind_of(&too_short, Field::Address),
            Some(FieldErrorKind::TooShort { min_chars: 5 })
        );
    }

    // =========================================================================
    // phone
    // =========================================================================

    #[test]
    fn phone_with_invalid_second_digit_is_rejected() {
        let input = SubsidyFormInput {
            phone: "12345678901".to_string(),
            ..valid_input()
        };

        assert_eq!(
            kind_of(&input, Field::Phone),
            Some(FieldErrorKind::PatternMismatch)
        );
    }

    #[test]
    fn phone_is_trimmed_before_matching() {
        let input = SubsidyFormInput {
            phone: " 13800138000 ".to_string(),
            ..valid_input()
        };

        assert_eq!(kind_of(&input, Field::Phone), None);
    }

    #[test]
    fn phone_with_wrong_length_is_rejected() {
        for phone in ["1380013800", "138001380000", "1380013800a"] {
            let input = SubsidyFormInput {
                phone: phone.to_string(),
                ..valid_input()
            };
            assert_eq!(
                kind_of(&input, Field::Phone),
                Some(FieldErrorKind::PatternMismatch),
                "phone {phone}"
            );
        }
    }

    #[test]
    fn phone_rejects_non_ascii_digits() {
        let input = SubsidyFormInput {
            phone: "1３800138000".to_string(),
            ..valid_input()
        };

        assert_eq!(
            kind_of(&input, Field::Phone),
            Some(FieldErrorKind::PatternMismatch)
        );
    }

    // =========================================================================
    // id card
    // =========================================================================

    #[test]
    fn id_card_accepts_fifteen_and_eighteen_char_forms() {
        for id in ["110101900307777", "110101199003077777", "11010119900307777X", "11010119900307777x"] {
            let input = SubsidyFormInput {
                id_card: id.to_string(),
                ..valid_input()
            };
            assert_eq!(kind_of(&input, Field::IdCard), None, "id {id}");
        }
    }

    #[test]
    fn id_card_with_seventeen_digits_is_rejected() {
        let input = SubsidyFormInput {
            id_card: "11010119900307777".to_string(),
            ..valid_input()
        };

        assert_eq!(
            kind_of(&input, Field::IdCard),
            Some(FieldErrorKind::PatternMismatch)
        );
    }

    #[test]
    fn id_card_check_char_only_allowed_last() {
        let input = SubsidyFormInput {
            id_card: "X10101199003077777".to_string(),
            ..valid_input()
        };

        assert_eq!(
            kind_of(&input, Field::IdCard),
            Some(FieldErrorKind::PatternMismatch)
        );
    }

    // =========================================================================
    // energy level / price / privacy
    // =========================================================================

    #[test]
    fn unknown_energy_code_is_accepted() {
        let input = SubsidyFormInput {
            energy_level: "3".to_string(),
            ..valid_input()
        };

        assert_eq!(kind_of(&input, Field::EnergyLevel), None);
    }

    #[test]
    fn blank_energy_level_is_missing() {
        let input = SubsidyFormInput {
            energy_level: " ".to_string(),
            ..valid_input()
        };

        assert_eq!(
            validate(&input).get(Field::EnergyLevel).unwrap().message,
            "请选择能效类型"
        );
    }

    #[test]
    fn non_positive_or_unparseable_price_is_invalid() {
        for price in ["0", "-5", "abc", " "] {
            let input = SubsidyFormInput {
                price: price.to_string(),
                ..valid_input()
            };
            assert_eq!(
                kind_of(&input, Field::Price),
                Some(FieldErrorKind::InvalidAmount),
                "price {price:?}"
            );
        }
    }

    #[test]
    fn empty_price_is_missing() {
        let input = SubsidyFormInput {
            price: String::new(),
            ..valid_input()
        };

        assert_eq!(
            validate(&input).get(Field::Price).unwrap().message,
            "请输入全国统一价"
        );
    }

    #[test]
    fn validate_application_returns_parsed_price_and_trimmed_code() {
        let input = SubsidyFormInput {
            energy_level: " 2 ".to_string(),
            price: "1000".to_string(),
            ..valid_input()
        };

        let application = validate_application(&input).unwrap();

        assert_eq!(application.energy_code, "2");
        assert_eq!(application.price, Decimal::new(1000, 0));
    }

    #[test]
    fn validate_application_returns_errors_on_failure() {
        let input = SubsidyFormInput {
            price: "0".to_string(),
            ..valid_input()
        };

        let errors = validate_application(&input).unwrap_err();

        assert!(errors.contains(Field::Price));
    }

    #[test]
    fn unticked_privacy_box_is_reported() {
        let input = SubsidyFormInput {
            agree_privacy: false,
            ..valid_input()
        };
        let errors = validate(&input);

        assert_eq!(errors.len(), 1);
        assert!(errors.contains(Field::AgreePrivacy));
    }
}
