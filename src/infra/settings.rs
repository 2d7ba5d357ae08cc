//! Usage: Persisted application settings (schema + read/write helpers).

use crate::app_paths;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_WINDOW_WIDTH: u32 = 1024;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 768;

/// Last known placement of the main window, in physical pixels.
///
/// `x`/`y` stay absent until the window has been placed once; the window
/// manager centers it on first launch. The 768x600 minimum is enforced
/// by the window itself, not by this record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowGeometry {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub schema_version: u32,
    pub last_window_state: WindowGeometry,
    pub always_on_top: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            last_window_state: WindowGeometry::default(),
            always_on_top: false,
        }
    }
}

fn sanitize_geometry(settings: &mut AppSettings) -> bool {
    let geometry = &mut settings.last_window_state;
    let mut changed = false;

    // Zero-sized records come from hand-edited files; fall back to the
    // defaults rather than creating an invisible window.
    if geometry.width == 0 {
        geometry.width = DEFAULT_WINDOW_WIDTH;
        changed = true;
    }
    if geometry.height == 0 {
        geometry.height = DEFAULT_WINDOW_HEIGHT;
        changed = true;
    }

    changed
}

fn settings_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    Ok(app_paths::app_data_dir(app)?.join("settings.json"))
}

fn parse_settings_json(content: &str) -> Result<(AppSettings, bool), String> {
    let raw: serde_json::Value =
        serde_json::from_str(content).map_err(|e| format!("failed to parse settings.json: {e}"))?;
    let schema_version_present = raw.get("schema_version").is_some();
    let settings: AppSettings =
        serde_json::from_value(raw).map_err(|e| format!("failed to parse settings.json: {e}"))?;
    Ok((settings, schema_version_present))
}

pub fn read(app: &tauri::AppHandle) -> Result<AppSettings, String> {
    let path = settings_path(app)?;

    if !path.exists() {
        let settings = AppSettings::default();
        // Best-effort: create default settings.json on first read to make the config discoverable/editable.
        let _ = write(app, &settings);
        return Ok(settings);
    }

    let content =
        std::fs::read_to_string(&path).map_err(|e| format!("failed to read settings: {e}"))?;
    let (mut settings, schema_version_present) = parse_settings_json(&content)?;

    let mut repaired = sanitize_geometry(&mut settings);

    // If the schema version is missing, force a write to persist the current schema_version so we
    // don't re-run migrations on every startup.
    if !schema_version_present || settings.schema_version != SCHEMA_VERSION {
        settings.schema_version = SCHEMA_VERSION;
        repaired = true;
    }

    if repaired {
        // Best-effort: persist repaired values while keeping read semantics.
        let _ = write(app, &settings);
    }

    Ok(settings)
}

pub fn write(app: &tauri::AppHandle, settings: &AppSettings) -> Result<(), String> {
    let path = settings_path(app)?;
    let tmp_path = path.with_file_name("settings.json.tmp");
    let backup_path = path.with_file_name("settings.json.bak");

    let content = serde_json::to_vec_pretty(settings)
        .map_err(|e| format!("failed to serialize settings: {e}"))?;

    std::fs::write(&tmp_path, content)
        .map_err(|e| format!("failed to write temp settings file: {e}"))?;

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    if path.exists() {
        std::fs::rename(&path, &backup_path)
            .map_err(|e| format!("failed to create settings backup: {e}"))?;
    }

    if let Err(e) = std::fs::rename(&tmp_path, &path) {
        let _ = std::fs::rename(&backup_path, &path);
        return Err(format!("failed to finalize settings: {e}"));
    }

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    Ok(())
}

/// Overwrites the stored window placement. Callers decide whether to
/// record at all (fullscreen geometry is never recorded).
pub fn record_window_state(app: &tauri::AppHandle, geometry: WindowGeometry) -> Result<(), String> {
    let mut settings = read(app).unwrap_or_default();
    settings.last_window_state = geometry;
    write(app, &settings)
}

#[cfg(test)]
mod tests {
    use super::{
        parse_settings_json, sanitize_geometry, AppSettings, WindowGeometry,
        DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, SCHEMA_VERSION,
    };

    #[test]
    fn empty_object_parses_to_defaults() {
        let (settings, schema_version_present) = parse_settings_json("{}").unwrap();
        assert!(!schema_version_present);
        assert_eq!(settings.schema_version, SCHEMA_VERSION);
        assert_eq!(settings.last_window_state, WindowGeometry::default());
        assert!(!settings.always_on_top);
    }

    #[test]
    fn stored_fields_survive_a_round_trip() {
        let mut settings = AppSettings::default();
        settings.last_window_state = WindowGeometry {
            x: Some(-4),
            y: Some(120),
            width: 1440,
            height: 900,
        };
        settings.always_on_top = true;

        let json = serde_json::to_string(&settings).unwrap();
        let (parsed, schema_version_present) = parse_settings_json(&json).unwrap();
        assert!(schema_version_present);
        assert_eq!(parsed.last_window_state, settings.last_window_state);
        assert!(parsed.always_on_top);
    }

    #[test]
    fn partial_geometry_keeps_defaults_for_the_rest() {
        let (settings, _) =
            parse_settings_json(r#"{"last_window_state": {"width": 800}}"#).unwrap();
        assert_eq!(settings.last_window_state.width, 800);
        assert_eq!(settings.last_window_state.height, DEFAULT_WINDOW_HEIGHT);
        assert_eq!(settings.last_window_state.x, None);
    }

    #[test]
    fn zero_sized_geometry_is_repaired() {
        let mut settings = AppSettings::default();
        settings.last_window_state.width = 0;
        settings.last_window_state.height = 0;

        assert!(sanitize_geometry(&mut settings));
        assert_eq!(settings.last_window_state.width, DEFAULT_WINDOW_WIDTH);
        assert_eq!(settings.last_window_state.height, DEFAULT_WINDOW_HEIGHT);

        assert!(!sanitize_geometry(&mut settings));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_settings_json("not json").is_err());
        assert!(parse_settings_json(r#"{"always_on_top": "nope"}"#).is_err());
    }
}
