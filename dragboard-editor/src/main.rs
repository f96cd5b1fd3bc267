// Dragboard Editor
// Thin egui host around the dragboard-core transform engine

use clap::Parser;
use eframe::egui;

mod app;
mod config;

use app::BoardApp;
use config::EditorConfig;

/// Dragboard - drag, resize, and rotate widgets inside a container
#[derive(Parser, Debug)]
#[command(name = "Dragboard")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Container width in board units (overrides the saved config)
    #[arg(long)]
    container_width: Option<f64>,

    /// Container height in board units (overrides the saved config)
    #[arg(long)]
    container_height: Option<f64>,
}

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = EditorConfig::load();
    if let Some(width) = args.container_width {
        config.container_width = width;
    }
    if let Some(height) = args.container_height {
        config.container_height = height;
    }

    if let Err(e) = config.transform.validate() {
        tracing::warn!("invalid transform config ({e}), using defaults");
        config.transform = Default::default();
    }
    config.save();

    let window = egui::vec2(
        config.container_width as f32 + 40.0,
        config.container_height as f32 + 80.0,
    );
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(window)
            .with_app_id("dragboard-editor"),
        ..Default::default()
    };

    eframe::run_native(
        "Dragboard",
        options,
        Box::new(move |_cc| Ok(Box::new(BoardApp::new(config)))),
    )
}
