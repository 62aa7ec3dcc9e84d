// Holiday Clock Application
// Main entry point

use std::path::PathBuf;

use holiday_clock::config::{self, AppConfig};
use holiday_clock::services::autostart;
use holiday_clock::services::preferences::FileSettingsStore;
use holiday_clock::ui_egui::ClockApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let preferences_path =
        config::preferences_path().unwrap_or_else(|| PathBuf::from("preferences.json"));
    let store = FileSettingsStore::open(preferences_path);

    // Session-start invocation from the autostart entry: consult the
    // persisted flag and either relaunch the clock screen or exit quietly.
    if std::env::args().any(|arg| arg == "--boot") {
        autostart::run_boot_launch(
            &store,
            autostart::BOOT_SETTLE_DELAY,
            autostart::spawn_detached,
        );
        return Ok(());
    }

    log::info!("Starting Holiday Clock v{}", env!("CARGO_PKG_VERSION"));

    let app_config = AppConfig::load();
    log::info!(
        "Display time zone: {}, assets dir: {}",
        app_config.time_zone,
        app_config.assets_dir.display()
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Holiday Clock")
            .with_fullscreen(true),
        ..Default::default()
    };

    eframe::run_native(
        "holiday-clock",
        native_options,
        Box::new(move |cc| Ok(Box::new(ClockApp::new(cc, app_config, store)))),
    )
}
