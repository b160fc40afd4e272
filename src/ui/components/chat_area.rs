use eframe::egui::{self, RichText};

use crate::common::{Contact, Message, MessageStatus};
use crate::ui::theme::Palette;

use super::avatar;

/// Header with the contact's presence. Returns true when the back button was
/// clicked.
pub fn render_header(ui: &mut egui::Ui, contact: &Contact, typing: bool, palette: &Palette) -> bool {
    let mut back = false;
    ui.horizontal(|ui| {
        if ui.button("←").on_hover_text("Back").clicked() {
            back = true;
        }
        avatar::render(ui, contact, 40.0, palette);
        ui.vertical(|ui| {
            ui.label(RichText::new(&contact.name).strong());
            let (status, color) = presence_label(contact, typing, palette);
            ui.label(RichText::new(status).small().color(color));
        });
    });
    back
}

fn presence_label(contact: &Contact, typing: bool, palette: &Palette) -> (&'static str, egui::Color32) {
    if typing {
        ("typing...", palette.accent)
    } else if contact.online {
        ("Online", palette.text_muted)
    } else {
        ("Offline", palette.text_muted)
    }
}

pub fn render(
    ui: &mut egui::Ui,
    contact: &Contact,
    messages: &[Message],
    typing: bool,
    palette: &Palette,
) {
    if messages.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(
                RichText::new(format!("Start a conversation with {}", contact.name))
                    .color(palette.text_muted),
            );
        });
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for message in messages {
                render_bubble(ui, message, palette);
            }
            if typing {
                render_typing(ui, palette);
            }
        });
}

fn render_bubble(ui: &mut egui::Ui, message: &Message, palette: &Palette) {
    let layout = if message.is_own {
        egui::Layout::right_to_left(egui::Align::TOP)
    } else {
        egui::Layout::left_to_right(egui::Align::TOP)
    };
    let text_color = if message.is_own {
        palette.own_text
    } else {
        palette.other_text
    };
    let max_width = ui.available_width() * 0.7;

    ui.with_layout(layout, |ui| {
        palette.bubble_frame(message.is_own).show(ui, |ui| {
            ui.set_max_width(max_width);
            ui.vertical(|ui| {
                ui.label(RichText::new(&message.text).color(text_color));
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&message.timestamp).small().color(text_color));
                    if message.is_own {
                        let (ticks, color) = receipt(message.status, palette);
                        ui.label(RichText::new(ticks).small().color(color));
                    }
                });
            });
        });
    });
    ui.add_space(4.0);
}

/// Tick marks for an own message: one grey, two grey, two blue.
pub fn receipt(status: MessageStatus, palette: &Palette) -> (&'static str, egui::Color32) {
    match status {
        MessageStatus::Sent => ("✓", palette.receipt_unread),
        MessageStatus::Received => ("✓✓", palette.receipt_unread),
        MessageStatus::Read => ("✓✓", palette.receipt_read),
    }
}

fn render_typing(ui: &mut egui::Ui, palette: &Palette) {
    ui.with_layout(egui::Layout::left_to_right(egui::Align::TOP), |ui| {
        palette.bubble_frame(false).show(ui, |ui| {
            ui.label(RichText::new("• • •").color(palette.text_muted));
        });
    });
}

pub fn render_welcome(ui: &mut egui::Ui, palette: &Palette) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.3);
        ui.label(RichText::new("💬").size(48.0));
        ui.heading("Welcome to Chat App");
        ui.label(
            RichText::new("Select a contact from the sidebar to start chatting")
                .color(palette.text_muted),
        );
    });
}
