//! Usage: Explicit lifecycle machine for the single main window.
//!
//! Platform callbacks are translated into [`Input`]s; the machine answers
//! with the [`Effect`]s the app layer must perform. It never touches the
//! windowing capability itself, which keeps every transition testable.

/// Lifecycle phase of the main window. Fullscreen is tracked as a
/// separate flag because the window stays conceptually visible while
/// fullscreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Window constructed hidden; the remote page load is in flight.
    Loading,
    Visible,
    Hidden,
    Minimized,
    /// A close was allowed to proceed; the window is gone.
    Terminal,
}

/// External events the machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// The page finished loading and is safe to present.
    PageLoaded,
    /// Dock icon click, tray activation, or a second-instance launch.
    Activated,
    /// The user asked to close the window. `quitting` is the process-wide
    /// flag owned by the lifecycle controller, passed in so the only
    /// read site is auditable here.
    CloseRequested { quitting: bool },
    /// Fullscreen flag as sampled after a window resize.
    FullscreenChanged(bool),
    /// Shutdown has begun; windows are still alive.
    QuitRequested,
}

/// Side effects to perform, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Show, unminimize, and focus the window.
    ShowWindow,
    MinimizeWindow,
    HideWindow,
    /// Hide the whole application (platforms with a persistent dock).
    HideApplication,
    /// Do not intercept the pending close; the window will be destroyed.
    AllowClose,
    /// Flush current window geometry to the settings store.
    PersistGeometry,
    /// Add (`true`) or remove (`false`) the page-side `fullscreen` class.
    SetFullscreenClass(bool),
}

pub struct WindowLifecycle {
    phase: Phase,
    fullscreen: bool,
    start_minimized: bool,
    hide_application_on_close: bool,
}

impl WindowLifecycle {
    pub fn new(start_minimized: bool, hide_application_on_close: bool) -> Self {
        Self {
            phase: Phase::Loading,
            fullscreen: false,
            start_minimized,
            hide_application_on_close,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn handle(&mut self, input: Input) -> Vec<Effect> {
        if self.phase == Phase::Terminal {
            return Vec::new();
        }

        match input {
            Input::PageLoaded => {
                // Fires again on in-page reloads; re-showing a visible
                // window is a no-op.
                if self.start_minimized && self.phase == Phase::Loading {
                    self.phase = Phase::Minimized;
                    vec![Effect::MinimizeWindow]
                } else {
                    self.phase = Phase::Visible;
                    vec![Effect::ShowWindow]
                }
            }
            Input::Activated => {
                self.phase = Phase::Visible;
                vec![Effect::ShowWindow]
            }
            Input::CloseRequested { quitting: false } => {
                self.phase = Phase::Hidden;
                if self.hide_application_on_close {
                    vec![Effect::HideApplication]
                } else {
                    vec![Effect::HideWindow]
                }
            }
            Input::CloseRequested { quitting: true } => {
                self.phase = Phase::Terminal;
                if self.fullscreen {
                    vec![Effect::AllowClose]
                } else {
                    vec![Effect::PersistGeometry, Effect::AllowClose]
                }
            }
            Input::FullscreenChanged(fullscreen) => {
                if fullscreen == self.fullscreen {
                    return Vec::new();
                }
                self.fullscreen = fullscreen;
                vec![Effect::SetFullscreenClass(fullscreen)]
            }
            Input::QuitRequested => {
                // Fullscreen geometry is never recorded; whatever was
                // stored before entering fullscreen is retained.
                if self.fullscreen {
                    Vec::new()
                } else {
                    vec![Effect::PersistGeometry]
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Effect, Input, Phase, WindowLifecycle};

    fn machine() -> WindowLifecycle {
        WindowLifecycle::new(false, false)
    }

    #[test]
    fn page_load_shows_the_window() {
        let mut m = machine();
        assert_eq!(m.phase(), Phase::Loading);
        assert_eq!(m.handle(Input::PageLoaded), vec![Effect::ShowWindow]);
        assert_eq!(m.phase(), Phase::Visible);
    }

    #[test]
    fn start_minimized_applies_to_the_first_load_only() {
        let mut m = WindowLifecycle::new(true, false);
        assert_eq!(m.handle(Input::PageLoaded), vec![Effect::MinimizeWindow]);
        assert_eq!(m.phase(), Phase::Minimized);

        // A later in-page reload presents the window as usual.
        assert_eq!(m.handle(Input::PageLoaded), vec![Effect::ShowWindow]);
        assert_eq!(m.phase(), Phase::Visible);
    }

    #[test]
    fn close_without_quit_hides_instead_of_destroying() {
        let mut m = machine();
        m.handle(Input::PageLoaded);

        let effects = m.handle(Input::CloseRequested { quitting: false });
        assert_eq!(effects, vec![Effect::HideWindow]);
        assert_eq!(m.phase(), Phase::Hidden);
        assert!(!effects.contains(&Effect::AllowClose));
    }

    #[test]
    fn close_without_quit_hides_the_application_on_persistent_dock_platforms() {
        let mut m = WindowLifecycle::new(false, true);
        m.handle(Input::PageLoaded);

        let effects = m.handle(Input::CloseRequested { quitting: false });
        assert_eq!(effects, vec![Effect::HideApplication]);
        assert_eq!(m.phase(), Phase::Hidden);
    }

    #[test]
    fn close_while_quitting_is_terminal_and_persists_geometry() {
        let mut m = machine();
        m.handle(Input::PageLoaded);

        let effects = m.handle(Input::CloseRequested { quitting: true });
        assert_eq!(effects, vec![Effect::PersistGeometry, Effect::AllowClose]);
        assert_eq!(m.phase(), Phase::Terminal);
    }

    #[test]
    fn close_while_quitting_in_fullscreen_keeps_stored_geometry() {
        let mut m = machine();
        m.handle(Input::PageLoaded);
        m.handle(Input::FullscreenChanged(true));

        let effects = m.handle(Input::CloseRequested { quitting: true });
        assert_eq!(effects, vec![Effect::AllowClose]);
    }

    #[test]
    fn quit_flushes_geometry_unless_fullscreen() {
        let mut m = machine();
        m.handle(Input::PageLoaded);
        assert_eq!(m.handle(Input::QuitRequested), vec![Effect::PersistGeometry]);

        m.handle(Input::FullscreenChanged(true));
        assert_eq!(m.handle(Input::QuitRequested), vec![]);
    }

    #[test]
    fn activation_always_yields_visible() {
        let mut m = machine();
        m.handle(Input::PageLoaded);

        m.handle(Input::CloseRequested { quitting: false });
        assert_eq!(m.phase(), Phase::Hidden);
        assert_eq!(m.handle(Input::Activated), vec![Effect::ShowWindow]);
        assert_eq!(m.phase(), Phase::Visible);

        let mut m = WindowLifecycle::new(true, false);
        m.handle(Input::PageLoaded);
        assert_eq!(m.phase(), Phase::Minimized);
        assert_eq!(m.handle(Input::Activated), vec![Effect::ShowWindow]);
        assert_eq!(m.phase(), Phase::Visible);
    }

    #[test]
    fn fullscreen_class_toggles_only_on_edges() {
        let mut m = machine();
        m.handle(Input::PageLoaded);

        assert_eq!(
            m.handle(Input::FullscreenChanged(true)),
            vec![Effect::SetFullscreenClass(true)]
        );
        // Repeated resize events while fullscreen stay silent.
        assert_eq!(m.handle(Input::FullscreenChanged(true)), vec![]);
        assert_eq!(
            m.handle(Input::FullscreenChanged(false)),
            vec![Effect::SetFullscreenClass(false)]
        );
        assert_eq!(m.handle(Input::FullscreenChanged(false)), vec![]);
    }

    #[test]
    fn terminal_is_absorbing() {
        let mut m = machine();
        m.handle(Input::PageLoaded);
        m.handle(Input::CloseRequested { quitting: true });

        assert_eq!(m.handle(Input::Activated), vec![]);
        assert_eq!(m.handle(Input::PageLoaded), vec![]);
        assert_eq!(m.handle(Input::QuitRequested), vec![]);
    }
}
