mod app;
mod commands;
mod domain;
mod infra;
mod shared;

pub(crate) use infra::{app_paths, settings};

use app::lifecycle::LifecycleState;
use app::window::MainWindowState;
use clap::Parser;
use commands::*;
use domain::window_lifecycle::Input;
use tauri::Manager;

/// Launch flags. GUI launchers may append platform arguments; anything
/// that does not parse falls back to the defaults instead of aborting.
#[derive(Debug, Default, Parser)]
#[command(name = "paper-desktop", about = "Dropbox Paper in a native window", version)]
struct LaunchArgs {
    /// Start with the main window minimized.
    #[arg(long, alias = "minimize")]
    minimized: bool,
}

fn launch_args() -> LaunchArgs {
    match LaunchArgs::try_parse() {
        Ok(args) => args,
        Err(err)
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            err.exit()
        }
        Err(err) => {
            eprintln!("ignoring unrecognized launch arguments: {err}");
            LaunchArgs::default()
        }
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let args = launch_args();

    let builder = tauri::Builder::default()
        .manage(LifecycleState::default())
        .manage(MainWindowState::new(args.minimized))
        .plugin(tauri_plugin_opener::init());

    #[cfg(desktop)]
    let builder = builder.plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
        // A second launch only restores the holder; its own flags are dropped.
        app::window::dispatch(app, Input::Activated);
    }));

    let app = builder
        .on_window_event(app::window::on_window_event)
        .setup(|app| {
            app::logging::init(app.handle());

            // Menu goes in before the window exists.
            if let Err(err) = app::menu::install(app.handle()) {
                tracing::error!("application menu installation failed: {err}");
            }

            app::window::create_main_window(app.handle())?;

            #[cfg(desktop)]
            {
                if let Err(err) = app::resident::setup_tray(app.handle()) {
                    tracing::error!("tray icon initialization failed: {err}");
                }
            }

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![page_title_updated])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| {
        if let tauri::RunEvent::ExitRequested { .. } = &event {
            // Shutdown begins here and only here; close handlers observe
            // the flag through managed state from now on.
            app_handle.state::<LifecycleState>().begin_quit();
            app::window::dispatch(app_handle, Input::QuitRequested);
            return;
        }

        #[cfg(target_os = "macos")]
        if let tauri::RunEvent::Reopen { .. } = event {
            app::window::dispatch(app_handle, Input::Activated);
        }
    });
}
