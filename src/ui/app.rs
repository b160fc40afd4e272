use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{ChatCommand, ChatEvent};

use super::components::{
    chat_area, input_bar,
    navbar::{self, NavbarActions},
    sidebar::{self, SidebarActions},
};
use super::state::AppState;
use super::theme::Palette;

/// Timers fire on the engine side, so the UI must keep polling for snapshots.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct ChatApp {
    state: AppState,
    command_sender: mpsc::Sender<ChatCommand>,
    event_receiver: mpsc::Receiver<ChatEvent>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<ChatCommand>,
        event_receiver: mpsc::Receiver<ChatEvent>,
    ) -> Self {
        Self {
            state: AppState::new(),
            command_sender,
            event_receiver,
        }
    }

    fn handle_chat_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                ChatEvent::StateChanged(snapshot) => self.state.apply_snapshot(*snapshot),
            }
        }
    }

    fn send_command(&mut self, command: ChatCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to chat engine: {err}");
        }
    }

    fn handle_navbar(&mut self, actions: NavbarActions) {
        if actions.toggle_sidebar {
            self.state.sidebar_open = !self.state.sidebar_open;
        }
        if actions.toggle_theme {
            self.send_command(ChatCommand::ToggleTheme);
        }
        if let Some(term) = actions.search_term {
            self.send_command(ChatCommand::SetSearchTerm(term));
        }
    }

    fn handle_sidebar(&mut self, actions: SidebarActions) {
        if let Some(contact_id) = actions.selected_contact {
            self.send_command(ChatCommand::SelectContact(contact_id));
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_chat_events();

        let theme = self.state.theme();
        let palette = Palette::for_theme(theme);
        if self.state.needs_visuals() {
            palette.apply_visuals(ctx, theme);
            self.state.applied_theme = Some(theme);
        }

        egui::TopBottomPanel::top("navbar")
            .frame(palette.bar_frame())
            .show(ctx, |ui| {
                let actions = navbar::render(
                    ui,
                    &mut self.state.search_text,
                    self.state.sidebar_open,
                    theme,
                    &palette,
                );
                self.handle_navbar(actions);
            });

        if self.state.sidebar_open {
            egui::SidePanel::left("contact_sidebar")
                .resizable(true)
                .default_width(320.0)
                .show(ctx, |ui| {
                    let actions = sidebar::render(ui, &self.state.snapshot.contacts, &palette);
                    self.handle_sidebar(actions);
                });
        }

        let Some(contact) = self.state.snapshot.selected.clone() else {
            egui::CentralPanel::default().show(ctx, |ui| {
                chat_area::render_welcome(ui, &palette);
            });
            ctx.request_repaint_after(POLL_INTERVAL);
            return;
        };

        egui::TopBottomPanel::top("chat_header")
            .frame(palette.bar_frame())
            .show(ctx, |ui| {
                if chat_area::render_header(ui, &contact, self.state.snapshot.typing, &palette) {
                    self.send_command(ChatCommand::CloseConversation);
                }
            });

        egui::TopBottomPanel::bottom("composer")
            .frame(palette.bar_frame())
            .show(ctx, |ui| {
                if let Some(content) = input_bar::render(ui, &mut self.state.input_text) {
                    self.send_command(ChatCommand::SendMessage(content));
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            chat_area::render(
                ui,
                &contact,
                &self.state.snapshot.messages,
                self.state.snapshot.typing,
                &palette,
            );
        });

        ctx.request_repaint_after(POLL_INTERVAL);
    }
}
