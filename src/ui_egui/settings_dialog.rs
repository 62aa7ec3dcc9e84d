use egui::RichText;

/// Outcome of one frame of the settings dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsDialogAction {
    None,
    Save { auto_start_enabled: bool },
    Cancel,
}

/// Render the settings dialog. `draft` is the unsaved checkbox state owned
/// by the caller; nothing is persisted until Save is clicked.
pub fn render_settings_dialog(ctx: &egui::Context, draft: &mut bool) -> SettingsDialogAction {
    let mut action = SettingsDialogAction::None;
    let mut dialog_open = true;

    egui::Window::new("Settings")
        .open(&mut dialog_open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.checkbox(draft, "Launch automatically when the TV turns on");
            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    action = SettingsDialogAction::Cancel;
                }
                if ui.button(RichText::new("Save").strong()).clicked() {
                    action = SettingsDialogAction::Save {
                        auto_start_enabled: *draft,
                    };
                }
            });
        });

    // Window closed via its title-bar button.
    if !dialog_open {
        action = SettingsDialogAction::Cancel;
    }
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        action = SettingsDialogAction::Cancel;
    }
    action
}
