use egui::RichText;

/// Outcome of one frame of the first-launch dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstLaunchAction {
    None,
    EnableAutoStart,
    Dismiss,
}

/// Shown exactly once, on the first launch: offers to enable auto-start.
/// Either choice clears the first-launch flag.
pub fn render_first_launch_dialog(ctx: &egui::Context) -> FirstLaunchAction {
    let mut action = FirstLaunchAction::None;
    let mut dialog_open = true;

    egui::Window::new("Welcome")
        .open(&mut dialog_open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label("The clock can start automatically when the TV turns on.");
            ui.label("You can change this later in Settings (press S).");
            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if ui.button("Not now").clicked() {
                    action = FirstLaunchAction::Dismiss;
                }
                if ui
                    .button(RichText::new("Enable auto-start").strong())
                    .clicked()
                {
                    action = FirstLaunchAction::EnableAutoStart;
                }
            });
        });

    if !dialog_open {
        action = FirstLaunchAction::Dismiss;
    }
    action
}
