//! Calculator - a four-function calculator
//!
//! State and theme are kept in the user's config directory between runs.
//! Set `RUST_LOG=debug` to trace every key press.

mod app;
mod keypad;
mod theme;

use app::CalculatorApp;
use eframe::NativeOptions;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .compact()
        .init();

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([320.0, 460.0])
            .with_min_inner_size([260.0, 400.0])
            .with_title("calculator"),
        ..Default::default()
    };

    eframe::run_native(
        "calculator",
        options,
        Box::new(|cc| Box::new(CalculatorApp::new(cc))),
    )
}
