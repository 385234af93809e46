mod app;
mod audio;
mod config;
mod ui;

use app::SpectrumVisualizer;
use eframe::{NativeOptions, egui};

fn main() {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Microphone Spectrum Visualizer",
        options,
        Box::new(|cc| Ok(Box::new(SpectrumVisualizer::new(cc)))),
    )
    .expect("Failed to start application");
}
