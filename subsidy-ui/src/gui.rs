use anyhow::Result;
use gpui::{
    App, AppContext, Bounds, KeyBinding, Menu, MenuItem, WindowBounds, WindowOptions,
};
use gpui_component::Root;
use subsidy_core::PricingCalculator;
use tracing::info;

use crate::{
    DismissModal, Quit,
    components::{AppWindow, WindowPreferences},
    quit,
};

pub fn setup_app(app_cx: &mut App) {
    // This must be called before using any GPUI Component features.
    gpui_component::init(app_cx);

    app_cx.activate(true);

    // Bind platform-appropriate quit shortcut
    #[cfg(target_os = "macos")]
    app_cx.bind_keys([KeyBinding::new("cmd-q", Quit, None)]);

    #[cfg(not(target_os = "macos"))]
    app_cx.bind_keys([
        KeyBinding::new("ctrl-q", Quit, None),
        KeyBinding::new("alt-F4", Quit, None),
    ]);

    app_cx.bind_keys([KeyBinding::new("escape", DismissModal, Some("SubsidyForm"))]);

    app_cx.on_action(quit);

    app_cx.set_menus(vec![Menu {
        name: "Subsidy Form".into(),
        items: vec![MenuItem::action("Quit", Quit)],
    }]);
}

/// Opens the main window with the subsidy form priced by `pricing`.
pub fn open_main_window(
    app_cx: &mut App,
    pricing: PricingCalculator,
) -> Result<()> {
    let prefs = WindowPreferences::default();
    let options = WindowOptions {
        window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
            None, prefs.size, app_cx,
        ))),
        ..Default::default()
    };

    app_cx.open_window(options, |window, cx| {
        let view = cx.new(|view_cx| AppWindow::new(pricing, window, view_cx));
        cx.new(|root_cx| Root::new(gpui::AnyView::from(view), window, root_cx))
    })?;

    info!("Main window opened");
    Ok(())
}
