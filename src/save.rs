use crate::surface::PixelSurface;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

pub const EXPORT_SUBDIR: &str = "paint_exports";

pub fn exe_relative_output_folder_from_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(EXPORT_SUBDIR))
}

pub fn ensure_output_folder() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    let output = exe_relative_output_folder_from_path(&exe_path)?;
    fs::create_dir_all(&output)
        .with_context(|| format!("create export folder {}", output.display()))?;
    Ok(output)
}

pub fn timestamped_stem(now: chrono::DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

pub fn build_filename(stem: &str) -> String {
    format!("{stem}_canvas.png")
}

/// Export the canvas as a PNG. Transparent pixels stay transparent in the
/// output file.
pub fn export_png(surface: &PixelSurface, path: &Path) -> Result<()> {
    let img = image::RgbaImage::from_raw(
        surface.width(),
        surface.height(),
        surface.as_bytes().to_vec(),
    )
    .ok_or_else(|| anyhow!("surface buffer does not match its dimensions"))?;
    img.save(path)
        .with_context(|| format!("write canvas to {}", path.display()))?;
    Ok(())
}

/// Export into the exe-relative folder under a timestamped name, returning
/// the path written.
pub fn export_timestamped(surface: &PixelSurface) -> Result<PathBuf> {
    let folder = ensure_output_folder()?;
    let path = folder.join(build_filename(&timestamped_stem(Local::now())));
    export_png(surface, &path)?;
    tracing::info!(path = %path.display(), "exported canvas");
    Ok(path)
}
