//! Drives `FormController` end to end through an in-memory view, covering
//! the accepted and rejected submit paths and the dialog events.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use subsidy_core::{
    ClickTarget, ErrorView, Field, FormController, FormView, Key, ModalKind, PricingCalculator,
    ResultView, SubmitOutcome, SubsidyFormInput,
};

/// Stands in for the on-screen form: fields, inline errors, result panel
/// and dialog visibility.
#[derive(Debug, Default)]
struct RecordingView {
    input: SubsidyFormInput,
    submit_enabled: bool,
    errors: BTreeMap<Field, &'static str>,
    result: Option<ResultView>,
    success_visible: bool,
    privacy_visible: bool,
}

impl FormView for RecordingView {
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
        self.errors.clear();
    }

    fn show_errors(
        &mut self,
        errors: &ErrorView,
    ) {
        for line in errors.lines() {
            self.errors.insert(line.field, line.message);
        }
    }

    fn show_result(
        &mut self,
        result: &ResultView,
    ) {
        self.result = Some(result.clone());
    }

    fn reset_fields(&mut self) {
        self.input = SubsidyFormInput::default();
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

fn valid_input(
    energy_level: &str,
    price: &str,
) -> SubsidyFormInput {
    SubsidyFormInput {
        name: "李四".to_string(),
        phone: "13800138000".to_string(),
        id_card: "110101199003077777".to_string(),
        energy_level: energy_level.to_string(),
        price: price.to_string(),
        address: "上海市浦东新区世纪大道 100 号".to_string(),
        agree_privacy: true,
    }
}

fn controller() -> FormController<RecordingView> {
    FormController::new(RecordingView::default(), PricingCalculator::default())
}

#[test]
fn accepted_submit_shows_result_opens_modal_and_resets_fields() {
    let mut controller = controller();
    controller.view_mut().input = valid_input("1", "1000");

    let outcome = controller.handle_submit();

    let view = controller.view();
    assert!(outcome.is_accepted());
    assert_eq!(
        view.result,
        Some(ResultView {
            energy_label: "一级能效（80%）".to_string(),
            original_price: "1000.00".to_string(),
            discounted_price: "800.00".to_string(),
        })
    );
    assert!(view.success_visible);
    assert!(controller.modals().is_visible(ModalKind::Success));
    assert_eq!(view.input, SubsidyFormInput::default());
    assert!(view.submit_enabled);
}

#[test]
fn tier_two_discount_is_eighty_five_percent() {
    let mut controller = controller();
    controller.view_mut().input = valid_input("2", "1000");

    match controller.handle_submit() {
        SubmitOutcome::Accepted(quote) => assert_eq!(quote.discounted_price, dec!(850.00)),
        SubmitOutcome::Rejected(errors) => panic!("unexpected errors: {errors:?}"),
    }
    assert_eq!(
        controller.view().result.as_ref().map(|r| r.discounted_price.as_str()),
        Some("850.00")
    );
}

#[test]
fn rejected_submit_renders_errors_and_keeps_input() {
    let mut controller = controller();
    let input = SubsidyFormInput {
        phone: "12345678901".to_string(),
        price: "abc".to_string(),
        ..valid_input("1", "1000")
    };
    controller.view_mut().input = input.clone();

    let outcome = controller.handle_submit();

    let view = controller.view();
    assert!(matches!(outcome, SubmitOutcome::Rejected(ref e) if e.len() == 2));
    assert_eq!(view.errors.get(&Field::Phone), Some(&"请输入有效的中国大陆手机号码"));
    assert_eq!(view.errors.get(&Field::Price), Some(&"请输入大于 0 的有效金额"));
    assert_eq!(view.input, input);
    assert_eq!(view.result, None);
    assert!(!view.success_visible);
    assert!(view.submit_enabled);
}

#[test]
fn resubmitting_valid_data_clears_stale_errors() {
    let mut controller = controller();
    controller.view_mut().input = SubsidyFormInput::default();
    controller.handle_submit();
    assert_eq!(controller.view().errors.len(), Field::ALL.len());

    controller.view_mut().input = valid_input("2", "1999.5");
    let outcome = controller.handle_submit();

    assert!(outcome.is_accepted());
    assert!(controller.view().errors.is_empty());
}

#[test]
fn second_failure_shows_only_current_errors() {
    let mut controller = controller();
    controller.view_mut().input = SubsidyFormInput::default();
    controller.handle_submit();

    controller.view_mut().input = SubsidyFormInput {
        agree_privacy: false,
        ..valid_input("1", "500")
    };
    controller.handle_submit();

    let fields: Vec<&Field> = controller.view().errors.keys().collect();
    assert_eq!(fields, vec![&Field::AgreePrivacy]);
}

#[test]
fn escape_closes_success_modal() {
    let mut controller = controller();
    controller.view_mut().input = valid_input("1", "1000");
    controller.handle_submit();

    controller.handle_key(Key::Escape);

    assert!(!controller.view().success_visible);
    assert!(controller.modals().get(ModalKind::Success).aria_hidden());
}

#[test]
fn only_close_control_click_closes_success_modal() {
    let mut controller = controller();
    controller.view_mut().input = valid_input("1", "1000");
    controller.handle_submit();

    controller.handle_modal_click(ModalKind::Success, ClickTarget::Content);
    assert!(controller.view().success_visible);

    controller.handle_modal_click(ModalKind::Success, ClickTarget::CloseControl);
    assert!(!controller.view().success_visible);
}

#[test]
fn privacy_link_opens_privacy_modal_and_close_control_closes_it() {
    let mut controller = controller();

    controller.open_privacy();
    assert!(controller.view().privacy_visible);
    assert!(!controller.view().success_visible);

    controller.handle_key(Key::Escape);
    assert!(controller.view().privacy_visible);

    controller.handle_modal_click(ModalKind::Privacy, ClickTarget::CloseControl);
    assert!(!controller.view().privacy_visible);
}
