use gpui::{
    App, AppContext, ClickEvent, Context, Div, Entity, FocusHandle, InteractiveElement,
    IntoElement, ParentElement, Render, SharedString, Styled, TextAlign, Window, div, px,
};
use gpui_component::{
    ActiveTheme, Disableable, h_flex,
    button::{Button, ButtonVariants},
    checkbox::Checkbox,
    input::{Input, InputState, MaskPattern},
    select::{Select, SelectState},
    v_flex,
};
use subsidy_core::{
    ClickTarget, EnergyLevel, Field, FormController, Key, ModalKind, PricingCalculator,
    SubsidyFormInput,
};
use tracing::debug;

use crate::{
    DismissModal,
    components::{
        make_button,
        modals::{DialogHandlers, privacy_dialog, success_dialog},
    },
    form_state::FormState,
};

/// The subsidy application form, its inline errors and both dialogs.
pub struct SubsidyForm {
    controller: FormController<FormState>,
    fields: FormFields,
    agree_privacy: bool,
    focus_handle: FocusHandle,
}

/// Input controls, rebuilt from scratch when the form resets.
struct FormFields {
    name: Entity<InputState>,
    phone: Entity<InputState>,
    id_card: Entity<InputState>,
    energy_level: Entity<SelectState<Vec<SharedString>>>,
    price: Entity<InputState>,
    address: Entity<InputState>,
}

impl FormFields {
    fn new(
        window: &mut Window,
        cx: &mut Context<SubsidyForm>,
    ) -> Self {
        let levels: Vec<SharedString> = EnergyLevel::ALL
            .iter()
            .map(|level| SharedString::from(level.display_name()))
            .collect();

        Self {
            name: make_text_input("请输入姓名", window, cx),
            phone: make_text_input("请输入 11 位手机号码", window, cx),
            id_card: make_text_input("请输入 15 或 18 位身份证号", window, cx),
            energy_level: cx.new(|select_cx| SelectState::new(levels, None, window, select_cx)),
            price: make_price_input(window, cx),
            address: make_text_input("请输入详细收货地址", window, cx),
        }
    }

    /// Copies the control values into a [`SubsidyFormInput`].
    fn read(
        &self,
        agree_privacy: bool,
        cx: &App,
    ) -> SubsidyFormInput {
        let energy_level = self
            .energy_level
            .read(cx)
            .selected_value()
            .and_then(|name| EnergyLevel::from_display_name(name.as_ref()))
            .map(|level| level.code().to_string())
            .unwrap_or_default();

        SubsidyFormInput {
            name: self.name.read(cx).value().to_string(),
            phone: self.phone.read(cx).value().to_string(),
            id_card: self.id_card.read(cx).value().to_string(),
            energy_level,
            price: self.price.read(cx).value().to_string(),
            address: self.address.read(cx).value().to_string(),
            agree_privacy,
        }
    }
}

impl SubsidyForm {
    pub fn new(
        pricing: PricingCalculator,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        Self {
            controller: FormController::new(FormState::default(), pricing),
            fields: FormFields::new(window, cx),
            agree_privacy: false,
            focus_handle: cx.focus_handle(),
        }
    }

    fn submit(
        &mut self,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let input = self.fields.read(self.agree_privacy, cx);
        self.controller.view_mut().set_input(input);

        let outcome = self.controller.handle_submit();

        if self.controller.view_mut().take_reset_request() {
            debug!("resetting form fields");
            self.fields = FormFields::new(window, cx);
            self.agree_privacy = false;
        }
        if outcome.is_accepted() {
            // Escape reaches the form only while it holds focus.
            window.focus(&self.focus_handle);
        }
        cx.notify();
    }

    fn open_privacy(
        &mut self,
        cx: &mut Context<Self>,
    ) {
        self.controller.open_privacy();
        cx.notify();
    }

    fn modal_click(
        &mut self,
        kind: ModalKind,
        target: ClickTarget,
        cx: &mut Context<Self>,
    ) {
        if target == ClickTarget::CloseControl {
            cx.stop_propagation();
        }
        self.controller.handle_modal_click(kind, target);
        cx.notify();
    }

    fn dismiss_modal(
        &mut self,
        _: &DismissModal,
        _: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.controller.handle_key(Key::Escape);
        cx.notify();
    }

    fn dialog_handlers(
        kind: ModalKind,
        cx: &Context<Self>,
    ) -> DialogHandlers<
        impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
        impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    > {
        DialogHandlers {
            on_close: cx.listener(move |this, _: &ClickEvent, _, cx| {
                this.modal_click(kind, ClickTarget::CloseControl, cx)
            }),
            on_content: cx.listener(move |this, _: &ClickEvent, _, cx| {
                this.modal_click(kind, ClickTarget::Content, cx)
            }),
        }
    }
}

impl Render for SubsidyForm {
    fn render(
        &mut self,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let state = self.controller.view();
        let fields = &self.fields;

        let agree_error = state.error_for(Field::AgreePrivacy);
        let agree_row = h_flex()
            .gap_2()
            .p(px(2.))
            .rounded_md()
            .when_error(agree_error.is_some(), cx)
            .child(
                Checkbox::new("agree-privacy")
                    .checked(self.agree_privacy)
                    .label("我已阅读并同意")
                    .on_click(cx.listener(|this, checked: &bool, _, cx| {
                        this.agree_privacy = *checked;
                        cx.notify();
                    })),
            )
            .child(
                Button::new("privacy-link")
                    .ghost()
                    .label("《隐私政策》")
                    .on_click(cx.listener(|this, _: &ClickEvent, _, cx| this.open_privacy(cx))),
            );

        let submit_button = make_button(
            "submit",
            "提交申请",
            cx.listener(|this, _: &ClickEvent, window, cx| this.submit(window, cx)),
        )
        .disabled(!state.is_submit_enabled());

        v_flex()
            .id("subsidy-form")
            .key_context("SubsidyForm")
            .track_focus(&self.focus_handle)
            .on_action(cx.listener(Self::dismiss_modal))
            .relative()
            .size_full()
            .p_5()
            .gap_3()
            .child(div().text_xl().child("家电以旧换新补贴申请"))
            .child(field_row(Field::Name, Input::new(&fields.name).flex_grow(), state, cx))
            .child(field_row(Field::Phone, Input::new(&fields.phone).flex_grow(), state, cx))
            .child(field_row(Field::IdCard, Input::new(&fields.id_card).flex_grow(), state, cx))
            .child(field_row(
                Field::EnergyLevel,
                Select::new(&fields.energy_level).w_full(),
                state,
                cx,
            ))
            .child(field_row(Field::Price, Input::new(&fields.price).flex_grow(), state, cx))
            .child(field_row(Field::Address, Input::new(&fields.address).flex_grow(), state, cx))
            .child(agree_row)
            .children(agree_error.map(|message| error_text(message, cx)))
            .child(h_flex().justify_center().child(submit_button))
            .children(state.is_modal_visible(ModalKind::Success).then(|| {
                success_dialog(state.result(), Self::dialog_handlers(ModalKind::Success, cx), cx)
            }))
            .children(
                state
                    .is_modal_visible(ModalKind::Privacy)
                    .then(|| privacy_dialog(Self::dialog_handlers(ModalKind::Privacy, cx), cx)),
            )
    }
}

/// Border highlight for a container whose field failed validation.
trait ErrorHighlight: Styled + Sized {
    fn when_error(
        self,
        has_error: bool,
        cx: &App,
    ) -> Self {
        if has_error {
            self.border_1().border_color(cx.theme().danger)
        } else {
            self
        }
    }
}

impl ErrorHighlight for Div {}

/// A labelled control with its inline error message underneath.
fn field_row(
    field: Field,
    control: impl IntoElement,
    state: &FormState,
    cx: &App,
) -> Div {
    let error = state.error_for(field);

    v_flex()
        .gap_1()
        .child(
            make_labeled_row(format!("{}：", field.label()))
                .when_error(error.is_some(), cx)
                .child(control),
        )
        .children(error.map(|message| error_text(message, cx)))
}

fn error_text(
    message: &'static str,
    cx: &App,
) -> Div {
    div()
        .pl(px(155.))
        .text_sm()
        .text_color(cx.theme().danger)
        .child(message)
}

fn make_text_input(
    placeholder: impl Into<SharedString>,
    window: &mut Window,
    cx: &mut Context<SubsidyForm>,
) -> Entity<InputState> {
    cx.new(|input_cx| InputState::new(window, input_cx).placeholder(placeholder.into()))
}

fn make_price_input(
    window: &mut Window,
    cx: &mut Context<SubsidyForm>,
) -> Entity<InputState> {
    let pattern = MaskPattern::Number {
        separator: None,
        fraction: Some(2),
    };

    cx.new(|input_cx| {
        InputState::new(window, input_cx)
            .mask_pattern(pattern)
            .placeholder("请输入全国统一价（元）")
    })
}

/// Creates the common outer container and label shared by every field row.
fn make_labeled_row(label: impl Into<SharedString>) -> Div {
    h_flex()
        .items_center()
        .gap_5()
        .p(px(2.))
        .rounded_md()
        .child(
            div()
                .min_w(px(150.))
                .text_align(TextAlign::Right)
                .child(label.into()),
        )
}
