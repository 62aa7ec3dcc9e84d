mod app;
mod first_launch_dialog;
mod settings_dialog;
pub mod theme;

pub use app::ClockApp;
