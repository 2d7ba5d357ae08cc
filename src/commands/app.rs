//! Usage: App-level Tauri commands (webview-to-host notifications).

use crate::app::{badge, window};

/// Receives document-title changes from the title observer script. The
/// title is forwarded verbatim; parsing decides whether it changes any
/// badge state.
#[tauri::command]
pub(crate) fn page_title_updated(
    app: tauri::AppHandle,
    webview_window: tauri::WebviewWindow,
    title: String,
) {
    if webview_window.label() != window::MAIN_WINDOW_LABEL {
        return;
    }

    badge::update_from_title(&app, &title);
}
