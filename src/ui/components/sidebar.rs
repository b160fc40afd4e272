use eframe::egui::{self, RichText, Sense};

use crate::common::{ContactId, ContactSummary};
use crate::ui::theme::Palette;

use super::avatar;

#[derive(Default)]
pub struct SidebarActions {
    pub selected_contact: Option<ContactId>,
}

pub fn render(ui: &mut egui::Ui, contacts: &[ContactSummary], palette: &Palette) -> SidebarActions {
    let mut actions = SidebarActions::default();

    ui.heading("Chats");
    ui.separator();

    if contacts.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new("No contacts found").color(palette.text_muted));
        });
        return actions;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for row in contacts {
                if render_row(ui, row, palette).clicked() {
                    actions.selected_contact = Some(row.contact.id);
                }
            }
        });

    actions
}

fn render_row(ui: &mut egui::Ui, row: &ContactSummary, palette: &Palette) -> egui::Response {
    let fill = if row.selected {
        palette.selected_row
    } else {
        egui::Color32::TRANSPARENT
    };

    let frame = egui::Frame::new()
        .fill(fill)
        .inner_margin(egui::Margin::symmetric(8, 8))
        .corner_radius(egui::CornerRadius::same(8));

    frame
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                avatar::render(ui, &row.contact, 44.0, palette);
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&row.contact.name).strong());
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.label(
                                    RichText::new(&row.last_timestamp)
                                        .small()
                                        .color(palette.text_muted),
                                );
                            },
                        );
                    });
                    ui.label(RichText::new(&row.preview).color(palette.text_muted));
                });
            });
        })
        .response
        .interact(Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
}
