//! Colors and text sizes for the clock screen.

use egui::Color32;

/// Fixed palette for the fullscreen screen. Text is drawn twice (shadow
/// first) so it stays readable on light backgrounds.
pub struct ClockTheme {
    /// Painted when no background image could be loaded at all.
    pub fallback_background: Color32,
    pub clock_text: Color32,
    pub text_shadow: Color32,
    pub overlay_text: Color32,
    pub headline_size: f32,
    pub overlay_size: f32,
    pub counter_size: f32,
    pub corner_margin: f32,
}

impl ClockTheme {
    pub fn tv() -> Self {
        Self {
            fallback_background: Color32::from_rgb(18, 24, 38),
            clock_text: Color32::from_rgb(245, 245, 245),
            text_shadow: Color32::from_black_alpha(160),
            overlay_text: Color32::from_rgb(255, 215, 90),
            headline_size: 48.0,
            overlay_size: 64.0,
            counter_size: 36.0,
            corner_margin: 24.0,
        }
    }
}
