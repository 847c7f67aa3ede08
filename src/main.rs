use eframe::egui;
use rasterpad::app::PaintApp;
use rasterpad::{logging, settings};

fn main() -> anyhow::Result<()> {
    logging::init();

    let settings = settings::load().unwrap_or_else(|err| {
        tracing::warn!(?err, "failed to load paint settings, using defaults");
        settings::PaintSettings::default()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                (settings.canvas_width as f32 + 40.0).max(640.0),
                (settings.canvas_height as f32 + 120.0).max(480.0),
            ])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "rasterpad",
        native_options,
        Box::new(move |_cc| Box::new(PaintApp::new(&settings))),
    )
    .map_err(|err| anyhow::anyhow!("eframe exited with error: {err}"))?;

    Ok(())
}
