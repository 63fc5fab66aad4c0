mod engine;
mod error;
mod export;
mod model;
mod store;
mod ui;

use eframe::egui;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("canvas_gamificacao=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn main() -> eframe::Result<()> {
    init_tracing();

    let settings = ui::settings_io::load_settings();
    tracing::info!(model = %settings.model, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Canvas de Gamificação")
            .with_inner_size([1280.0, 820.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Canvas de Gamificação",
        options,
        Box::new(|cc| {
            Ok(Box::new(ui::app::CanvasApp::new(
                cc.egui_ctx.clone(),
                settings,
            )))
        }),
    )
}
