//! Usage: Process-wide lifecycle state (quit flag) and shutdown persistence.

use crate::app::window;
use crate::settings;
use std::sync::atomic::{AtomicBool, Ordering};
use tauri::Manager;

/// The only cross-component shared mutable flag: false until shutdown
/// begins. The close handler reads it through managed state, so every
/// access site is explicit.
#[derive(Default)]
pub struct LifecycleState {
    quitting: AtomicBool,
}

impl LifecycleState {
    /// Flips the flag; never flipped back. Window hiding must not call
    /// this.
    pub fn begin_quit(&self) {
        self.quitting.store(true, Ordering::SeqCst);
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting.load(Ordering::SeqCst)
    }
}

/// Flushes the current main-window geometry to the settings store.
/// Whether to flush at all is decided by the window lifecycle machine;
/// this is a best-effort capture of whatever the window reports.
pub fn persist_window_geometry(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(window::MAIN_WINDOW_LABEL) else {
        return;
    };

    let Ok(position) = window.outer_position() else {
        return;
    };
    let Ok(size) = window.inner_size() else {
        return;
    };
    if size.width == 0 || size.height == 0 {
        return;
    }

    let geometry = settings::WindowGeometry {
        x: Some(position.x),
        y: Some(position.y),
        width: size.width,
        height: size.height,
    };

    if let Err(err) = settings::record_window_state(app, geometry) {
        tracing::warn!("failed to persist window geometry: {err}");
    }
}
