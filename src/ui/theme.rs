use eframe::egui::{self, Color32, CornerRadius, Frame, Margin, Stroke};

use crate::common::ThemePreference;

/// Colours for one theme.
#[derive(Debug, Clone)]
pub struct Palette {
    pub surface: Color32,
    pub panel: Color32,
    pub border: Color32,
    pub accent: Color32,
    pub own_bubble: Color32,
    pub own_text: Color32,
    pub other_bubble: Color32,
    pub other_text: Color32,
    pub text_muted: Color32,
    pub selected_row: Color32,
    pub online: Color32,
    pub receipt_unread: Color32,
    pub receipt_read: Color32,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            surface: Color32::from_rgb(0xF9, 0xFA, 0xFB),
            panel: Color32::WHITE,
            border: Color32::from_rgb(0xE5, 0xE7, 0xEB),
            accent: Color32::from_rgb(0x25, 0x63, 0xEB),
            own_bubble: Color32::from_rgb(0x25, 0x63, 0xEB),
            own_text: Color32::WHITE,
            other_bubble: Color32::WHITE,
            other_text: Color32::from_rgb(0x1F, 0x29, 0x37),
            text_muted: Color32::from_rgb(0x6B, 0x72, 0x80),
            selected_row: Color32::from_rgb(0xEF, 0xF6, 0xFF),
            online: Color32::from_rgb(0x22, 0xC5, 0x5E),
            receipt_unread: Color32::from_rgb(0x9C, 0xA3, 0xAF),
            receipt_read: Color32::from_rgb(0x3B, 0x82, 0xF6),
        }
    }

    pub fn dark() -> Self {
        Self {
            surface: Color32::from_rgb(0x11, 0x18, 0x27),
            panel: Color32::from_rgb(0x1F, 0x29, 0x37),
            border: Color32::from_rgb(0x37, 0x41, 0x51),
            accent: Color32::from_rgb(0x60, 0xA5, 0xFA),
            own_bubble: Color32::from_rgb(0x25, 0x63, 0xEB),
            own_text: Color32::WHITE,
            other_bubble: Color32::from_rgb(0x1F, 0x29, 0x37),
            other_text: Color32::from_rgb(0xF3, 0xF4, 0xF6),
            text_muted: Color32::from_rgb(0x9C, 0xA3, 0xAF),
            selected_row: Color32::from_rgba_premultiplied(0x1E, 0x3A, 0x8A, 0x66),
            online: Color32::from_rgb(0x22, 0xC5, 0x5E),
            receipt_unread: Color32::from_rgb(0x9C, 0xA3, 0xAF),
            receipt_read: Color32::from_rgb(0x3B, 0x82, 0xF6),
        }
    }

    pub fn for_theme(theme: ThemePreference) -> Self {
        match theme {
            ThemePreference::Light => Self::light(),
            ThemePreference::Dark => Self::dark(),
        }
    }

    pub fn apply_visuals(&self, ctx: &egui::Context, theme: ThemePreference) {
        let mut visuals = match theme {
            ThemePreference::Light => egui::Visuals::light(),
            ThemePreference::Dark => egui::Visuals::dark(),
        };
        visuals.panel_fill = self.surface;
        visuals.window_fill = self.panel;
        visuals.selection.bg_fill = self.accent;
        visuals.hyperlink_color = self.accent;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        ctx.set_visuals(visuals);
    }

    pub fn bubble_frame(&self, own: bool) -> Frame {
        let (fill, stroke) = if own {
            (self.own_bubble, Stroke::NONE)
        } else {
            (self.other_bubble, Stroke::new(1.0, self.border))
        };
        Frame::new()
            .fill(fill)
            .stroke(stroke)
            .inner_margin(Margin::symmetric(12, 8))
            .corner_radius(CornerRadius::same(14))
    }

    pub fn bar_frame(&self) -> Frame {
        Frame::new()
            .fill(self.panel)
            .inner_margin(Margin::symmetric(12, 10))
            .stroke(Stroke::new(1.0, self.border))
    }
}

/// Resolves a contact's colour token to an avatar fill.
pub fn avatar_color(token: &str) -> Color32 {
    match token {
        "blue" => Color32::from_rgb(0x3B, 0x82, 0xF6),
        "pink" => Color32::from_rgb(0xEC, 0x48, 0x99),
        "green" => Color32::from_rgb(0x10, 0xB9, 0x81),
        "purple" => Color32::from_rgb(0x8B, 0x5C, 0xF6),
        "orange" => Color32::from_rgb(0xF9, 0x73, 0x16),
        "teal" => Color32::from_rgb(0x14, 0xB8, 0xA6),
        "red" => Color32::from_rgb(0xEF, 0x44, 0x44),
        _ => Color32::from_rgb(0x6B, 0x72, 0x80),
    }
}
