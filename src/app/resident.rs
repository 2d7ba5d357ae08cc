//! Usage: Desktop resident mode (tray icon lifecycle + activation hooks).

const TRAY_ID: &str = "main-tray";
const TRAY_MENU_TOGGLE_ID: &str = "tray.toggle";
const TRAY_MENU_QUIT_ID: &str = "tray.quit";
const TRAY_TOOLTIP: &str = "Paper";

#[cfg(not(desktop))]
pub fn setup_tray(_app: &tauri::AppHandle) -> Result<(), String> {
    Ok(())
}

#[cfg(desktop)]
use tauri::menu::{Menu, MenuItem, PredefinedMenuItem};
#[cfg(desktop)]
use tauri::tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};
#[cfg(desktop)]
use tauri::Manager;

#[cfg(desktop)]
use crate::app::window;
#[cfg(desktop)]
use crate::domain::window_lifecycle::Input;

#[cfg(desktop)]
pub fn setup_tray(app: &tauri::AppHandle) -> Result<(), String> {
    let toggle_item = MenuItem::with_id(app, TRAY_MENU_TOGGLE_ID, "Show/Hide Paper", true, None::<&str>)
        .map_err(|e| format!("failed to create tray toggle menu item: {e}"))?;
    let quit_item = MenuItem::with_id(app, TRAY_MENU_QUIT_ID, "Quit", true, None::<&str>)
        .map_err(|e| format!("failed to create tray quit menu item: {e}"))?;
    let separator = PredefinedMenuItem::separator(app)
        .map_err(|e| format!("failed to create tray menu separator: {e}"))?;

    let menu = Menu::with_items(app, &[&toggle_item, &separator, &quit_item])
        .map_err(|e| format!("failed to create tray menu: {e}"))?;

    let toggle_id = toggle_item.id().clone();
    let quit_id = quit_item.id().clone();

    #[cfg(target_os = "macos")]
    let icon_bytes = include_bytes!("../../icons/trayTemplate.png");
    #[cfg(not(target_os = "macos"))]
    let icon_bytes = include_bytes!("../../icons/tray.png");

    let icon = tauri::image::Image::from_bytes(icon_bytes)
        .map_err(|e| format!("failed to load tray icon: {e}"))?;

    let tray_builder = TrayIconBuilder::with_id(TRAY_ID)
        .icon(icon)
        .tooltip(TRAY_TOOLTIP)
        .menu(&menu);

    #[cfg(target_os = "macos")]
    let tray_builder = tray_builder.icon_as_template(true);

    tray_builder
        .show_menu_on_left_click(false)
        .on_menu_event(move |app, event| {
            if event.id == quit_id {
                app.exit(0);
                return;
            }
            if event.id == toggle_id {
                toggle_main_window(app);
            }
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button,
                button_state,
                ..
            } = event
            {
                if button == MouseButton::Left && button_state == MouseButtonState::Up {
                    window::dispatch(tray.app_handle(), Input::Activated);
                }
            }
        })
        .build(app)
        .map_err(|e| format!("failed to build tray icon: {e}"))?;

    Ok(())
}

/// Renders the unread count on the tray: title text next to the icon
/// where the shell supports it, tooltip everywhere. The dock badge
/// covers platforms without this surface.
#[cfg(any(target_os = "linux", target_os = "windows"))]
pub fn set_badge(app: &tauri::AppHandle, count: u32) {
    let Some(tray) = app.tray_by_id(TRAY_ID) else {
        return;
    };

    if count == 0 {
        let _ = tray.set_title(None::<&str>);
        let _ = tray.set_tooltip(Some(TRAY_TOOLTIP));
    } else {
        let _ = tray.set_title(Some(count.to_string()));
        let _ = tray.set_tooltip(Some(format!("{TRAY_TOOLTIP}: {count} unread")));
    }
}

#[cfg(desktop)]
fn toggle_main_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(window::MAIN_WINDOW_LABEL) else {
        return;
    };

    let is_visible = window.is_visible().unwrap_or(false);
    let is_minimized = window.is_minimized().unwrap_or(false);

    if !is_visible || is_minimized {
        window::dispatch(app, Input::Activated);
    } else {
        // A tray conceal takes the same path as a title-bar close.
        window::dispatch(app, Input::CloseRequested { quitting: false });
    }
}
