use eframe::egui;

/// Composer row. Returns the text to send, leaving the buffer empty.
pub fn render(ui: &mut egui::Ui, input_text: &mut String) -> Option<String> {
    let mut send = false;
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        let can_send = !input_text.trim().is_empty();
        let send_button = ui.add_enabled(can_send, egui::Button::new("Send ➤"));

        let width = ui.available_width();
        let response = ui.add(
            egui::TextEdit::singleline(input_text)
                .hint_text("Type a message...")
                .desired_width(width),
        );
        if send_button.clicked() {
            send = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
            response.request_focus();
        }
    });

    if send && !input_text.trim().is_empty() {
        return Some(std::mem::take(input_text));
    }

    None
}
