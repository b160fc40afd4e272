use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, vec2};

use crate::common::Contact;
use crate::ui::theme::{Palette, avatar_color};

/// Coloured circle with the contact's initials and an online dot.
pub fn render(ui: &mut egui::Ui, contact: &Contact, size: f32, palette: &Palette) {
    let (rect, _) = ui.allocate_exact_size(vec2(size, size), Sense::hover());
    let painter = ui.painter();
    let radius = size / 2.0;

    painter.circle_filled(rect.center(), radius, avatar_color(&contact.color));
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        &contact.avatar,
        FontId::proportional(size * 0.38),
        Color32::WHITE,
    );

    if contact.online {
        let dot = rect.right_bottom() - vec2(radius * 0.25, radius * 0.25);
        painter.circle(
            dot,
            radius * 0.25,
            palette.online,
            Stroke::new(2.0, palette.panel),
        );
    }
}
