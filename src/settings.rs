use crate::fill::DEFAULT_CAP_FRACTION;
use crate::surface::Rgba;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "paint_settings.json";

const MIN_CANVAS_DIM: u32 = 16;
const MAX_CANVAS_DIM: u32 = 4096;
const MAX_STROKE_WIDTH: u32 = 64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StrokeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<StrokeColor> for Rgba {
    fn from(color: StrokeColor) -> Self {
        Rgba::rgba(color.r, color.g, color.b, color.a)
    }
}

impl From<Rgba> for StrokeColor {
    fn from(color: Rgba) -> Self {
        Self {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaintSettings {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub stroke_width: u32,
    pub stroke_color: StrokeColor,
    pub fill_cap_fraction: f32,
}

impl Default for PaintSettings {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            stroke_width: 2,
            stroke_color: StrokeColor {
                r: 0,
                g: 0,
                b: 0,
                a: 255,
            },
            fill_cap_fraction: DEFAULT_CAP_FRACTION,
        }
    }
}

impl PaintSettings {
    /// Clamp loaded values into ranges the rest of the app assumes. A
    /// hand-edited settings file must not produce a zero-sized canvas or a
    /// fill cap of zero.
    pub fn sanitize(&mut self) {
        self.canvas_width = self.canvas_width.clamp(MIN_CANVAS_DIM, MAX_CANVAS_DIM);
        self.canvas_height = self.canvas_height.clamp(MIN_CANVAS_DIM, MAX_CANVAS_DIM);
        self.stroke_width = self.stroke_width.clamp(1, MAX_STROKE_WIDTH);
        if !(self.fill_cap_fraction > 0.0 && self.fill_cap_fraction <= 1.0) {
            self.fill_cap_fraction = DEFAULT_CAP_FRACTION;
        }
    }

    pub fn stroke_color(&self) -> Rgba {
        self.stroke_color.into()
    }
}

pub fn settings_path_from_exe_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(SETTINGS_FILE_NAME))
}

pub fn resolve_settings_path() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    settings_path_from_exe_path(&exe_path)
}

pub fn load() -> Result<PaintSettings> {
    let path = resolve_settings_path()?;
    load_from_path(&path)
}

pub fn load_from_path(path: &Path) -> Result<PaintSettings> {
    if !path.exists() {
        return Ok(PaintSettings::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read paint settings from {}", path.display()))?;
    let mut settings: PaintSettings =
        serde_json::from_str(&raw).context("deserialize paint settings")?;
    settings.sanitize();
    Ok(settings)
}

pub fn save(settings: &PaintSettings) -> Result<PathBuf> {
    let path = resolve_settings_path()?;
    save_to_path(&path, settings)?;
    Ok(path)
}

pub fn save_to_path(path: &Path, settings: &PaintSettings) -> Result<()> {
    let serialized =
        serde_json::to_string_pretty(settings).context("serialize paint settings")?;
    fs::write(path, serialized)
        .with_context(|| format!("write paint settings to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        load_from_path, save_to_path, settings_path_from_exe_path, PaintSettings,
        SETTINGS_FILE_NAME,
    };
    use std::path::Path;

    #[test]
    fn settings_file_sits_next_to_executable() {
        let exe = Path::new("/opt/rasterpad/bin/rasterpad");
        let path = settings_path_from_exe_path(exe).expect("settings path");
        assert_eq!(path, Path::new("/opt/rasterpad/bin").join(SETTINGS_FILE_NAME));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let loaded =
            load_from_path(Path::new("/nonexistent/paint_settings.json")).expect("defaults");
        assert_eq!(loaded, PaintSettings::default());
    }

    #[test]
    fn sanitize_clamps_out_of_range_values() {
        let mut settings = PaintSettings {
            canvas_width: 0,
            canvas_height: 1_000_000,
            stroke_width: 0,
            fill_cap_fraction: 1.5,
            ..PaintSettings::default()
        };
        settings.sanitize();
        assert_eq!(settings.canvas_width, 16);
        assert_eq!(settings.canvas_height, 4096);
        assert_eq!(settings.stroke_width, 1);
        assert_eq!(settings.fill_cap_fraction, 0.8);
    }

    #[test]
    fn sanitize_rejects_non_finite_cap() {
        let mut settings = PaintSettings {
            fill_cap_fraction: f32::NAN,
            ..PaintSettings::default()
        };
        settings.sanitize();
        assert_eq!(settings.fill_cap_fraction, 0.8);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let dir = std::env::temp_dir().join("rasterpad_settings_test");
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join(SETTINGS_FILE_NAME);

        let mut settings = PaintSettings::default();
        settings.canvas_width = 320;
        settings.canvas_height = 240;
        settings.stroke_width = 5;
        settings.fill_cap_fraction = 0.5;

        save_to_path(&path, &settings).expect("save settings");
        let loaded = load_from_path(&path).expect("load settings");
        assert_eq!(loaded, settings);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unknown_or_partial_json_fills_defaults() {
        let dir = std::env::temp_dir().join("rasterpad_settings_partial_test");
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join(SETTINGS_FILE_NAME);
        std::fs::write(&path, r#"{"stroke_width": 7}"#).expect("write partial settings");

        let loaded = load_from_path(&path).expect("load settings");
        assert_eq!(loaded.stroke_width, 7);
        assert_eq!(loaded.canvas_width, PaintSettings::default().canvas_width);

        let _ = std::fs::remove_file(&path);
    }
}
