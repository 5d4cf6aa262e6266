//! Success and privacy dialogs, drawn as overlays on top of the form.

use gpui::{
    App, ClickEvent, Div, InteractiveElement, IntoElement, ParentElement, SharedString,
    StatefulInteractiveElement, Styled, Window, black, div, px,
};
use gpui_component::{
    ActiveTheme, h_flex,
    button::{Button, ButtonVariants},
    v_flex,
};
use subsidy_core::ResultView;

const PRIVACY_POLICY: &[&str] = &[
    "1. 我们仅收集办理补贴所必需的信息：姓名、手机号码、身份证号、商品价格及收货地址。",
    "2. 上述信息仅用于补贴资格审核与发放，不会用于其他用途。",
    "3. 未经您的同意，我们不会向任何第三方提供您的个人信息，法律法规另有规定的除外。",
    "4. 我们采取必要的安全措施保护您的个人信息，防止泄露、损毁或丢失。",
    "5. 如对本政策有任何疑问，请联系当地商务主管部门。",
];

/// Handlers for the two kinds of click a dialog distinguishes.
pub struct DialogHandlers<C, O> {
    pub on_close: C,
    pub on_content: O,
}

pub fn success_dialog<C, O>(
    result: Option<&ResultView>,
    handlers: DialogHandlers<C, O>,
    cx: &App,
) -> impl IntoElement
where
    C: Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    O: Fn(&ClickEvent, &mut Window, &mut App) + 'static,
{
    let body = match result {
        Some(result) => v_flex()
            .gap_2()
            .child("您的补贴申请已提交，补贴价格如下：")
            .child(result_row("能效类型", result.energy_label.clone()))
            .child(result_row("全国统一价", format!("¥{}", result.original_price)))
            .child(result_row("补贴后价格", format!("¥{}", result.discounted_price))),
        None => v_flex(),
    };

    dialog_frame("success-modal", "提交成功", body, handlers, cx)
}

pub fn privacy_dialog<C, O>(
    handlers: DialogHandlers<C, O>,
    cx: &App,
) -> impl IntoElement
where
    C: Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    O: Fn(&ClickEvent, &mut Window, &mut App) + 'static,
{
    let body = v_flex()
        .gap_2()
        .text_sm()
        .children(PRIVACY_POLICY.iter().map(|line| div().child(*line)));

    dialog_frame("privacy-modal", "隐私政策", body, handlers, cx)
}

fn result_row(
    label: &'static str,
    value: impl Into<SharedString>,
) -> Div {
    h_flex()
        .gap_3()
        .child(div().min_w(px(100.)).child(label))
        .child(div().child(value.into()))
}

fn dialog_frame<C, O>(
    id: &'static str,
    title: &'static str,
    body: impl IntoElement,
    handlers: DialogHandlers<C, O>,
    cx: &App,
) -> impl IntoElement
where
    C: Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    O: Fn(&ClickEvent, &mut Window, &mut App) + 'static,
{
    let theme = cx.theme();

    div()
        .id(SharedString::from(format!("{id}-backdrop")))
        .occlude()
        .absolute()
        .top_0()
        .left_0()
        .size_full()
        .flex()
        .items_center()
        .justify_center()
        .bg(black().opacity(0.4))
        .child(
            v_flex()
                .id(id)
                .w(px(440.))
                .p_5()
                .gap_4()
                .rounded_lg()
                .shadow_lg()
                .border_1()
                .border_color(theme.border)
                .bg(theme.background)
                .on_click(handlers.on_content)
                .child(div().text_lg().child(title))
                .child(body)
                .child(
                    h_flex().justify_end().child(
                        Button::new(SharedString::from(format!("{id}-close")))
                            .primary()
                            .label("关闭")
                            .on_click(handlers.on_close),
                    ),
                ),
        )
}
