use gpui::{
    App, AppContext, Context, Entity, IntoElement, ParentElement, Render, Styled, Subscription,
    Window, div,
};
use gpui_component::StyledExt;
use subsidy_core::PricingCalculator;
use tracing::info;

use crate::components::SubsidyForm;
#[cfg(not(target_os = "linux"))]
use crate::{Quit, quit};

/// Top-level view of the main window, hosting the subsidy form.
pub struct AppWindow {
    _window_close_subscription: Subscription,
    form: Entity<SubsidyForm>,
}

impl AppWindow {
    pub fn new(
        pricing: PricingCalculator,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let subscription = cx.on_window_closed(|_cx: &mut App| {
            info!("Window closed callback");
            #[cfg(not(target_os = "linux"))]
            quit(&Quit, _cx);
        });

        let form = cx.new(|form_cx| SubsidyForm::new(pricing, window, form_cx));

        info!("Window constructed");
        Self {
            _window_close_subscription: subscription,
            form,
        }
    }
}

impl Render for AppWindow {
    fn render(
        &mut self,
        _: &mut Window,
        _cx: &mut Context<Self>,
    ) -> impl IntoElement {
        div()
            .v_flex()
            .size_full()
            .items_center()
            .child(self.form.clone())
    }
}
