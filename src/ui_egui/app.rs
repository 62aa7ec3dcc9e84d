//! Fullscreen clock screen.
//!
//! One `eframe` window: background image (or a plain color), the date in
//! the top-left corner, the time in the top-right, the holiday caption and
//! day counter centered lower on screen. The repaint timer doubles as the
//! tick loop and dies with the window.

use std::sync::Arc;
use std::time::Duration;

use egui::{
    Align2, Color32, ColorImage, FontId, Pos2, Rect, TextureHandle, TextureOptions, Vec2,
};

use crate::config::AppConfig;
use crate::services::assets::{self, DirAssetCatalog};
use crate::services::autostart;
use crate::services::holiday::HolidayResolver;
use crate::services::preferences::{FileSettingsStore, SettingsStore};
use crate::services::timekeeper::TimeKeeper;
use crate::ui_egui::first_launch_dialog::{render_first_launch_dialog, FirstLaunchAction};
use crate::ui_egui::settings_dialog::{render_settings_dialog, SettingsDialogAction};
use crate::ui_egui::theme::ClockTheme;
use crate::utils::date::{date_key, days_since};

/// Repaint interval. Shorter than a second so a displayed second is never
/// skipped, while ticks stay cheap (no resolution on an unchanged date).
const REPAINT_INTERVAL: Duration = Duration::from_millis(250);

pub struct ClockApp {
    config: AppConfig,
    resolver: HolidayResolver,
    catalog: DirAssetCatalog,
    keeper: TimeKeeper,
    store: FileSettingsStore,
    theme: ClockTheme,
    /// Texture of the current background, `None` when the whole fallback
    /// chain failed and we paint a plain color.
    background: Option<TextureHandle>,
    /// Asset path the current texture was decoded from.
    background_path: Option<Arc<str>>,
    show_settings: bool,
    settings_draft: bool,
    show_first_launch: bool,
}

impl eframe::App for ClockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.keeper.tick(&self.resolver);
        self.refresh_background(ctx);
        self.handle_keyboard(ctx);
        self.render_screen(ctx);
        self.render_dialogs(ctx);
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}

impl ClockApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        store: FileSettingsStore,
    ) -> Self {
        let resolver = HolidayResolver::new(config.holidays_path());
        let catalog = DirAssetCatalog::new(&config.assets_dir);
        let keeper = TimeKeeper::new(config.time_zone, &resolver);
        let show_first_launch = store.first_launch();
        let settings_draft = store.auto_start_enabled();

        Self {
            config,
            resolver,
            catalog,
            keeper,
            store,
            theme: ClockTheme::tv(),
            background: None,
            background_path: None,
            show_settings: false,
            settings_draft,
            show_first_launch,
        }
    }

    /// Decodes and uploads the background texture, but only when the
    /// resolved path actually changed. Decoding happens at most once per
    /// calendar day.
    fn refresh_background(&mut self, ctx: &egui::Context) {
        let path = self.keeper.state().background_path.clone();
        if self
            .background_path
            .as_ref()
            .is_some_and(|current| current.as_ref() == path.as_ref())
        {
            return;
        }

        self.background = assets::load_background(&self.catalog, &path).map(|bitmap| {
            let image = ColorImage::from_rgba_unmultiplied(
                [bitmap.width as usize, bitmap.height as usize],
                &bitmap.rgba,
            );
            ctx.load_texture("background", image, TextureOptions::LINEAR)
        });
        self.background_path = Some(path);
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let dialog_open = self.show_settings || self.show_first_launch;
        if !dialog_open && ctx.input(|i| i.key_pressed(egui::Key::S)) {
            self.settings_draft = self.store.auto_start_enabled();
            self.show_settings = true;
        }
    }

    fn render_screen(&mut self, ctx: &egui::Context) {
        let frame = egui::Frame::none().fill(self.theme.fallback_background);
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let screen = ui.max_rect();

            if let Some(texture) = &self.background {
                let uv = cover_uv(texture.size_vec2(), screen.size());
                ui.painter().image(texture.id(), screen, uv, Color32::WHITE);
            }

            let state = self.keeper.state().clone();
            let margin = self.theme.corner_margin;

            let date_text = state.current_date.format(&self.config.date_format).to_string();
            self.shadowed_text(
                ui,
                Pos2::new(screen.left() + margin, screen.top() + margin),
                Align2::LEFT_TOP,
                &date_text,
                self.theme.headline_size,
                self.theme.clock_text,
            );

            let time_text = state.current_time.format(&self.config.time_format).to_string();
            self.shadowed_text(
                ui,
                Pos2::new(screen.right() - margin, screen.top() + margin),
                Align2::RIGHT_TOP,
                &time_text,
                self.theme.headline_size,
                self.theme.clock_text,
            );

            if let Some(caption) = self
                .resolver
                .lookup(&date_key(state.current_date))
                .and_then(|entry| entry.text.clone())
            {
                self.shadowed_text(
                    ui,
                    Pos2::new(screen.center().x, screen.center().y + screen.height() * 0.22),
                    Align2::CENTER_CENTER,
                    &caption,
                    self.theme.overlay_size,
                    self.theme.overlay_text,
                );
            }

            let days = days_since(self.config.anchor_date, state.current_date);
            self.shadowed_text(
                ui,
                Pos2::new(screen.center().x, screen.bottom() - margin),
                Align2::CENTER_BOTTOM,
                &self.config.day_counter_text(days),
                self.theme.counter_size,
                self.theme.clock_text,
            );
        });
    }

    fn shadowed_text(
        &self,
        ui: &egui::Ui,
        pos: Pos2,
        anchor: Align2,
        text: &str,
        size: f32,
        color: Color32,
    ) {
        let font = FontId::proportional(size);
        ui.painter().text(
            pos + Vec2::splat(2.0),
            anchor,
            text,
            font.clone(),
            self.theme.text_shadow,
        );
        ui.painter().text(pos, anchor, text, font, color);
    }

    fn render_dialogs(&mut self, ctx: &egui::Context) {
        if self.show_first_launch {
            match render_first_launch_dialog(ctx) {
                FirstLaunchAction::None => {}
                FirstLaunchAction::EnableAutoStart => {
                    self.apply_auto_start(true);
                    self.finish_first_launch();
                }
                FirstLaunchAction::Dismiss => self.finish_first_launch(),
            }
            return;
        }

        if self.show_settings {
            match render_settings_dialog(ctx, &mut self.settings_draft) {
                SettingsDialogAction::None => {}
                SettingsDialogAction::Save { auto_start_enabled } => {
                    self.apply_auto_start(auto_start_enabled);
                    self.show_settings = false;
                }
                SettingsDialogAction::Cancel => self.show_settings = false,
            }
        }
    }

    fn finish_first_launch(&mut self) {
        if let Err(err) = self.store.set_first_launch(false) {
            log::error!("failed to clear first-launch flag: {:#}", err);
        }
        self.show_first_launch = false;
    }

    fn apply_auto_start(&mut self, enabled: bool) {
        if let Err(err) = self.store.set_auto_start_enabled(enabled) {
            log::error!("failed to save preferences: {:#}", err);
        }
        let result = if enabled {
            autostart::install_autostart()
        } else {
            autostart::remove_autostart()
        };
        if let Err(err) = result {
            log::warn!("failed to update autostart entry: {:#}", err);
        }
    }
}

/// UV rectangle that crops the texture to fill the screen without
/// letterboxing (the wider dimension is trimmed symmetrically).
fn cover_uv(texture: Vec2, screen: Vec2) -> Rect {
    if texture.x <= 0.0 || texture.y <= 0.0 || screen.x <= 0.0 || screen.y <= 0.0 {
        return Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    }

    let texture_aspect = texture.x / texture.y;
    let screen_aspect = screen.x / screen.y;

    if texture_aspect > screen_aspect {
        let width = screen_aspect / texture_aspect;
        let left = (1.0 - width) / 2.0;
        Rect::from_min_max(Pos2::new(left, 0.0), Pos2::new(left + width, 1.0))
    } else {
        let height = texture_aspect / screen_aspect;
        let top = (1.0 - height) / 2.0;
        Rect::from_min_max(Pos2::new(0.0, top), Pos2::new(1.0, top + height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_aspect_uses_the_full_texture() {
        let uv = cover_uv(Vec2::new(1920.0, 1080.0), Vec2::new(1920.0, 1080.0));
        assert_eq!(uv, Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)));
    }

    #[test]
    fn wide_texture_is_cropped_horizontally() {
        let uv = cover_uv(Vec2::new(2000.0, 1000.0), Vec2::new(1000.0, 1000.0));
        assert!(uv.min.x > 0.0 && uv.max.x < 1.0);
        assert_eq!(uv.min.y, 0.0);
        assert_eq!(uv.max.y, 1.0);
    }

    #[test]
    fn tall_texture_is_cropped_vertically() {
        let uv = cover_uv(Vec2::new(1000.0, 2000.0), Vec2::new(1000.0, 1000.0));
        assert!(uv.min.y > 0.0 && uv.max.y < 1.0);
        assert_eq!(uv.min.x, 0.0);
        assert_eq!(uv.max.x, 1.0);
    }

    #[test]
    fn degenerate_sizes_do_not_divide_by_zero() {
        let uv = cover_uv(Vec2::ZERO, Vec2::new(100.0, 100.0));
        assert_eq!(uv, Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)));
    }
}
