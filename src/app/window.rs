//! Usage: Main window construction and lifecycle event wiring.
//!
//! Platform callbacks are reduced to [`Input`]s for the lifecycle machine
//! in `domain::window_lifecycle`; the effects it returns are executed
//! here against the actual window.

use crate::app::lifecycle::{self, LifecycleState};
use crate::domain::window_lifecycle::{Effect, Input, WindowLifecycle};
use crate::settings;
use crate::shared::mutex_ext::MutexExt;
use std::sync::Mutex;
use tauri::webview::PageLoadEvent;
use tauri::{Manager, PhysicalPosition, PhysicalSize, WebviewUrl, WebviewWindow};
use tauri_plugin_opener::OpenerExt;

pub const MAIN_WINDOW_LABEL: &str = "main";

const PAPER_URL: &str = "https://paper.dropbox.com/";
const MIN_WINDOW_WIDTH: f64 = 768.0;
const MIN_WINDOW_HEIGHT: f64 = 600.0;

// Injected before page scripts on every load; reports <title> changes
// over IPC since Tauri has no page-title event for remote pages.
const TITLE_OBSERVER_JS: &str = include_str!("../../assets/title-observer.js");
const PAGE_CSS: &str = include_str!("../../assets/browser.css");

/// The single main-window lifecycle machine, shared by every event hook.
pub struct MainWindowState(Mutex<WindowLifecycle>);

impl MainWindowState {
    pub fn new(start_minimized: bool) -> Self {
        Self(Mutex::new(WindowLifecycle::new(
            start_minimized,
            cfg!(target_os = "macos"),
        )))
    }
}

pub fn create_main_window(app: &tauri::AppHandle) -> Result<WebviewWindow, String> {
    let settings = settings::read(app).unwrap_or_else(|err| {
        tracing::warn!("failed to read settings, using defaults: {err}");
        settings::AppSettings::default()
    });
    let geometry = settings.last_window_state;

    let url: tauri::Url = PAPER_URL
        .parse()
        .map_err(|e| format!("failed to parse app url: {e}"))?;

    let navigation_handle = app.clone();
    let mut builder = tauri::WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, WebviewUrl::External(url))
        .title("Paper")
        .visible(false)
        .inner_size(geometry.width as f64, geometry.height as f64)
        .min_inner_size(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)
        .always_on_top(settings.always_on_top)
        .initialization_script(TITLE_OBSERVER_JS)
        .on_navigation(move |url| {
            if is_app_origin(url) {
                return true;
            }
            // In-page links to other origins belong in the default browser.
            if let Err(err) = navigation_handle.opener().open_url(url.as_str(), None::<&str>) {
                tracing::warn!(url = %url, "failed to open external link: {err}");
            }
            false
        })
        .on_page_load(|window, payload| {
            if matches!(payload.event(), PageLoadEvent::Finished) {
                inject_page_css(&window);
                dispatch(window.app_handle(), Input::PageLoaded);
            }
        });

    if geometry.x.is_none() || geometry.y.is_none() {
        builder = builder.center();
    }

    #[cfg(target_os = "macos")]
    let builder = builder.title_bar_style(tauri::TitleBarStyle::Overlay);

    let window = builder
        .build()
        .map_err(|e| format!("failed to create main window: {e}"))?;

    // Saved geometry is in physical pixels; apply it after construction so
    // a scale-factor change between sessions cannot skew the logical size.
    if let (Some(x), Some(y)) = (geometry.x, geometry.y) {
        let _ = window.set_position(PhysicalPosition::new(x, y));
        let _ = window.set_size(PhysicalSize::new(geometry.width, geometry.height));
    }

    Ok(window)
}

/// Runs one input through the lifecycle machine and executes the
/// resulting effects.
pub fn dispatch(app: &tauri::AppHandle, input: Input) {
    let effects = handle_input(app, input);
    apply_effects(app, &effects);
}

fn handle_input(app: &tauri::AppHandle, input: Input) -> Vec<Effect> {
    let state = app.state::<MainWindowState>();
    let mut machine = state.0.lock_or_recover();
    let effects = machine.handle(input);
    tracing::debug!(phase = ?machine.phase(), ?input, ?effects, "window lifecycle");
    effects
}

pub fn on_window_event(window: &tauri::Window, event: &tauri::WindowEvent) {
    if window.label() != MAIN_WINDOW_LABEL {
        return;
    }

    match event {
        tauri::WindowEvent::CloseRequested { api, .. } => {
            let app = window.app_handle();
            let quitting = app.state::<LifecycleState>().is_quitting();
            let effects = handle_input(app, Input::CloseRequested { quitting });
            if !effects.contains(&Effect::AllowClose) {
                api.prevent_close();
            }
            apply_effects(app, &effects);
        }
        // Tauri emits no dedicated fullscreen event; sample the flag on
        // resize and let the machine dedupe the edges.
        tauri::WindowEvent::Resized(_) => {
            let app = window.app_handle();
            let fullscreen = window.is_fullscreen().unwrap_or(false);
            dispatch(app, Input::FullscreenChanged(fullscreen));
        }
        _ => {}
    }
}

fn apply_effects(app: &tauri::AppHandle, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::ShowWindow => show_main_window(app),
            Effect::MinimizeWindow => {
                if let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) {
                    let _ = window.minimize();
                }
            }
            Effect::HideWindow => {
                if let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) {
                    let _ = window.hide();
                }
            }
            Effect::HideApplication => hide_application(app),
            Effect::AllowClose => {}
            Effect::PersistGeometry => lifecycle::persist_window_geometry(app),
            Effect::SetFullscreenClass(fullscreen) => set_fullscreen_class(app, *fullscreen),
        }
    }
}

pub fn show_main_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    let _ = window.show();
    let _ = window.unminimize();
    let _ = window.set_focus();
}

#[cfg(target_os = "macos")]
fn hide_application(app: &tauri::AppHandle) {
    let _ = app.hide();
}

#[cfg(not(target_os = "macos"))]
fn hide_application(app: &tauri::AppHandle) {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) {
        let _ = window.hide();
    }
}

fn set_fullscreen_class(app: &tauri::AppHandle, fullscreen: bool) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    let script = if fullscreen {
        "document.body.classList.add('fullscreen');"
    } else {
        "document.body.classList.remove('fullscreen');"
    };
    if let Err(err) = window.eval(script) {
        tracing::warn!("failed to toggle fullscreen class: {err}");
    }
}

fn inject_page_css(window: &WebviewWindow) {
    // A JSON string literal doubles as a JS string literal.
    let css = serde_json::Value::String(PAGE_CSS.to_string()).to_string();
    let script = format!(
        "(function() {{ const style = document.createElement('style'); style.textContent = {css}; document.head.appendChild(style); }})();"
    );
    if let Err(err) = window.eval(&script) {
        tracing::warn!("failed to inject stylesheet: {err}");
    }
}

/// In-window navigation is limited to the Paper product and its sign-in
/// flow (which crosses dropbox.com subdomains); everything else opens
/// externally.
fn is_app_origin(url: &tauri::Url) -> bool {
    match url.scheme() {
        "http" | "https" => {}
        // about:blank and webview-internal schemes.
        _ => return true,
    }

    match url.host_str() {
        Some(host) => host == "dropbox.com" || host.ends_with(".dropbox.com"),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::is_app_origin;

    fn url(s: &str) -> tauri::Url {
        s.parse().unwrap()
    }

    #[test]
    fn paper_and_sign_in_stay_in_window() {
        assert!(is_app_origin(&url("https://paper.dropbox.com/")));
        assert!(is_app_origin(&url("https://paper.dropbox.com/doc/Notes-abc123")));
        assert!(is_app_origin(&url("https://www.dropbox.com/login")));
        assert!(is_app_origin(&url("https://dropbox.com/")));
    }

    #[test]
    fn other_origins_open_externally() {
        assert!(!is_app_origin(&url("https://example.com/")));
        assert!(!is_app_origin(&url("https://paper.dropbox.com.evil.com/")));
        assert!(!is_app_origin(&url("http://notdropbox.com/")));
    }

    #[test]
    fn webview_internal_schemes_are_left_alone() {
        assert!(is_app_origin(&url("about:blank")));
        assert!(is_app_origin(&url("data:text/html,hi")));
    }
}
