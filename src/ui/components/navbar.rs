use eframe::egui::{self, RichText};

use crate::common::ThemePreference;
use crate::ui::theme::Palette;

#[derive(Default)]
pub struct NavbarActions {
    pub toggle_sidebar: bool,
    pub toggle_theme: bool,
    pub search_term: Option<String>,
}

pub fn render(
    ui: &mut egui::Ui,
    search_text: &mut String,
    sidebar_open: bool,
    theme: ThemePreference,
    palette: &Palette,
) -> NavbarActions {
    let mut actions = NavbarActions::default();

    ui.horizontal(|ui| {
        let menu_icon = if sidebar_open { "✕" } else { "☰" };
        if ui.button(menu_icon).on_hover_text("Toggle chats").clicked() {
            actions.toggle_sidebar = true;
        }

        ui.label(RichText::new("ChatApp").heading().strong().color(palette.accent));
        ui.add_space(16.0);

        let response = ui.add(
            egui::TextEdit::singleline(search_text)
                .hint_text("🔍 Search chats...")
                .desired_width(260.0),
        );
        if response.changed() {
            actions.search_term = Some(search_text.clone());
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(" SC ")
                    .strong()
                    .color(egui::Color32::WHITE)
                    .background_color(palette.accent),
            )
            .on_hover_text("Your Profile");

            let theme_icon = match theme {
                ThemePreference::Light => "🌙",
                ThemePreference::Dark => "☀",
            };
            if ui.button(theme_icon).on_hover_text("Toggle theme").clicked() {
                actions.toggle_theme = true;
            }
        });
    });

    actions
}
