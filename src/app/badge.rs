//! Usage: Badge dispatch for observed page titles (dock and tray surfaces).

use crate::domain::badge;

/// Forwards a raw title-change event to the parser and pushes the result
/// to every badge surface this platform has. Titles without the Paper
/// marker leave the previous badge untouched.
pub fn update_from_title(app: &tauri::AppHandle, title: &str) {
    let Some(count) = badge::parse_unread_count(title) else {
        return;
    };

    tracing::debug!(count, "unread badge update");

    set_dock_badge(app, count);
    set_tray_badge(app, count);
}

#[cfg(any(target_os = "macos", target_os = "linux"))]
fn set_dock_badge(app: &tauri::AppHandle, count: u32) {
    use tauri::Manager;

    let Some(window) = app.get_webview_window(crate::app::window::MAIN_WINDOW_LABEL) else {
        return;
    };

    let badge = if count == 0 { None } else { Some(count as i64) };
    if let Err(err) = window.set_badge_count(badge) {
        tracing::warn!("failed to set dock badge: {err}");
    }
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn set_dock_badge(_app: &tauri::AppHandle, _count: u32) {}

#[cfg(any(target_os = "linux", target_os = "windows"))]
fn set_tray_badge(app: &tauri::AppHandle, count: u32) {
    crate::app::resident::set_badge(app, count);
}

#[cfg(not(any(target_os = "linux", target_os = "windows")))]
fn set_tray_badge(_app: &tauri::AppHandle, _count: u32) {}
