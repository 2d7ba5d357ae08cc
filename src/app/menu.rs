//! Usage: Native application menu (installed once, before window creation).

use crate::app::window;
use crate::settings;
use tauri::menu::{CheckMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu};
use tauri::Manager;
use tauri_plugin_opener::OpenerExt;

const MENU_RELOAD_ID: &str = "menu.view.reload";
const MENU_ALWAYS_ON_TOP_ID: &str = "menu.window.always-on-top";
const MENU_WEBSITE_ID: &str = "menu.help.website";

const WEBSITE_URL: &str = "https://paper.dropbox.com/";

pub fn install(app: &tauri::AppHandle) -> Result<(), String> {
    let settings = settings::read(app).unwrap_or_default();

    let menu = build_menu(app, settings.always_on_top)
        .map_err(|e| format!("failed to build application menu: {e}"))?;
    app.set_menu(menu)
        .map_err(|e| format!("failed to install application menu: {e}"))?;
    app.on_menu_event(handle_menu_event);

    Ok(())
}

fn build_menu(app: &tauri::AppHandle, always_on_top: bool) -> tauri::Result<Menu<tauri::Wry>> {
    let menu = Menu::new(app)?;

    #[cfg(target_os = "macos")]
    {
        let app_menu = Submenu::with_items(
            app,
            "Paper",
            true,
            &[
                &PredefinedMenuItem::about(app, None, None)?,
                &PredefinedMenuItem::separator(app)?,
                &PredefinedMenuItem::services(app, None)?,
                &PredefinedMenuItem::separator(app)?,
                &PredefinedMenuItem::hide(app, None)?,
                &PredefinedMenuItem::hide_others(app, None)?,
                &PredefinedMenuItem::show_all(app, None)?,
                &PredefinedMenuItem::separator(app)?,
                &PredefinedMenuItem::quit(app, None)?,
            ],
        )?;
        menu.append(&app_menu)?;
    }

    #[cfg(not(target_os = "macos"))]
    {
        let file_menu = Submenu::with_items(
            app,
            "File",
            true,
            &[
                &PredefinedMenuItem::close_window(app, Some("Close Window"))?,
                &PredefinedMenuItem::separator(app)?,
                &PredefinedMenuItem::quit(app, None)?,
            ],
        )?;
        menu.append(&file_menu)?;
    }

    let edit_menu = Submenu::with_items(
        app,
        "Edit",
        true,
        &[
            &PredefinedMenuItem::undo(app, None)?,
            &PredefinedMenuItem::redo(app, None)?,
            &PredefinedMenuItem::separator(app)?,
            &PredefinedMenuItem::cut(app, None)?,
            &PredefinedMenuItem::copy(app, None)?,
            &PredefinedMenuItem::paste(app, None)?,
            &PredefinedMenuItem::select_all(app, None)?,
        ],
    )?;

    let view_menu = Submenu::with_items(
        app,
        "View",
        true,
        &[
            &MenuItem::with_id(app, MENU_RELOAD_ID, "Reload", true, Some("CmdOrCtrl+R"))?,
            &PredefinedMenuItem::separator(app)?,
            &PredefinedMenuItem::fullscreen(app, None)?,
        ],
    )?;

    let window_menu = Submenu::with_items(
        app,
        "Window",
        true,
        &[
            &PredefinedMenuItem::minimize(app, None)?,
            &CheckMenuItem::with_id(
                app,
                MENU_ALWAYS_ON_TOP_ID,
                "Always on Top",
                true,
                always_on_top,
                None::<&str>,
            )?,
            &PredefinedMenuItem::separator(app)?,
            &PredefinedMenuItem::close_window(app, None)?,
        ],
    )?;

    let help_menu = Submenu::with_items(
        app,
        "Help",
        true,
        &[&MenuItem::with_id(
            app,
            MENU_WEBSITE_ID,
            "Paper Website",
            true,
            None::<&str>,
        )?],
    )?;

    menu.append_items(&[&edit_menu, &view_menu, &window_menu, &help_menu])?;

    Ok(menu)
}

fn handle_menu_event(app: &tauri::AppHandle, event: tauri::menu::MenuEvent) {
    match event.id().0.as_str() {
        MENU_RELOAD_ID => {
            if let Some(window) = app.get_webview_window(window::MAIN_WINDOW_LABEL) {
                if let Err(err) = window.eval("location.reload();") {
                    tracing::warn!("failed to reload page: {err}");
                }
            }
        }
        MENU_ALWAYS_ON_TOP_ID => toggle_always_on_top(app),
        MENU_WEBSITE_ID => {
            if let Err(err) = app.opener().open_url(WEBSITE_URL, None::<&str>) {
                tracing::warn!("failed to open website: {err}");
            }
        }
        _ => {}
    }
}

/// Applies the toggle to the live window and persists it; the check item
/// flips its own state natively.
fn toggle_always_on_top(app: &tauri::AppHandle) {
    let mut settings = settings::read(app).unwrap_or_default();
    settings.always_on_top = !settings.always_on_top;

    if let Some(window) = app.get_webview_window(window::MAIN_WINDOW_LABEL) {
        let _ = window.set_always_on_top(settings.always_on_top);
    }

    if let Err(err) = settings::write(app, &settings) {
        tracing::warn!("failed to persist always-on-top: {err}");
    }
}
