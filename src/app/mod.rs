//! Usage: Application layer (managed state, menu/tray/window lifecycle, startup wiring).

pub(crate) mod badge;
pub(crate) mod lifecycle;
pub(crate) mod logging;
pub(crate) mod menu;
pub(crate) mod resident;
pub(crate) mod window;
