use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use crate::chat::{ChatSession, ContactDirectory, ReplySelector};
use crate::common::{ChatCommand, ChatEvent, ThemePreference};
use crate::config::AppConfig;
use crate::storage::PreferenceStore;

pub fn build_session(config: &AppConfig, theme: ThemePreference) -> ChatSession {
    ChatSession::new(
        ContactDirectory::new(config.contacts()),
        config.delays,
        ReplySelector::new(config.filler_replies()),
        theme,
    )
}

/// Owns the chat session and drives its timers.
///
/// Commands from the UI and due transitions are handled one at a time on a
/// single task, and every change is published as a fresh snapshot.
pub struct ChatEngine {
    session: ChatSession,
    preferences: Option<PreferenceStore>,
    event_sender: mpsc::Sender<ChatEvent>,
    command_receiver: mpsc::Receiver<ChatCommand>,
    origin: Instant,
}

impl ChatEngine {
    pub fn new(
        session: ChatSession,
        preferences: Option<PreferenceStore>,
        event_sender: mpsc::Sender<ChatEvent>,
        command_receiver: mpsc::Receiver<ChatCommand>,
    ) -> Self {
        Self {
            session,
            preferences,
            event_sender,
            command_receiver,
            origin: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        Instant::now().saturating_duration_since(self.origin)
    }

    pub async fn run(mut self) {
        log::info!("Chat engine started");
        if !self.publish().await {
            return;
        }

        loop {
            let deadline = self
                .session
                .next_deadline()
                .map(|offset| self.origin + offset);

            tokio::select! {
                command = self.command_receiver.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        None => break,
                    }
                }
                _ = wait_until(deadline) => {
                    let now = self.elapsed();
                    let applied = self.session.advance(now);
                    log::trace!("Applied {applied} scheduled transitions");
                }
            }

            if !self.publish().await {
                break;
            }
        }

        log::info!(
            "Chat engine stopped with {} pending transitions",
            self.session.pending_transitions()
        );
    }

    fn handle_command(&mut self, command: ChatCommand) {
        // Apply anything already overdue so transitions keep their order
        // relative to the command.
        let now = self.elapsed();
        self.session.advance(now);

        match command {
            ChatCommand::SelectContact(contact_id) => {
                self.session.select_contact(contact_id);
            }
            ChatCommand::CloseConversation => self.session.close_conversation(),
            ChatCommand::SendMessage(text) => {
                self.session.send_message(&text, now);
            }
            ChatCommand::SetSearchTerm(term) => self.session.set_search_term(term),
            ChatCommand::ToggleTheme => {
                let theme = self.session.toggle_theme();
                log::info!("Theme switched to {}", theme.as_str());
                if let Some(preferences) = &self.preferences {
                    if let Err(err) = preferences.set_theme(theme) {
                        log::warn!("Failed to persist theme: {err}");
                    }
                }
            }
        }
    }

    /// Returns false once the UI has gone away.
    async fn publish(&mut self) -> bool {
        let snapshot = Box::new(self.session.snapshot());
        if let Err(err) = self
            .event_sender
            .send(ChatEvent::StateChanged(snapshot))
            .await
        {
            log::warn!("Failed to notify UI about state change: {err}");
            return false;
        }
        true
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::DeliveryDelays;
    use crate::chat::reply::default_fillers;
    use crate::common::{ContactId, MessageStatus, SessionSnapshot};
    use tempfile::TempDir;

    struct Harness {
        commands: mpsc::Sender<ChatCommand>,
        events: mpsc::Receiver<ChatEvent>,
        handle: tokio::task::JoinHandle<()>,
    }

    fn spawn_engine(preferences: Option<PreferenceStore>) -> Harness {
        let session = ChatSession::new(
            ContactDirectory::builtin(),
            DeliveryDelays::default(),
            ReplySelector::with_seed(default_fillers(), 9),
            ThemePreference::Light,
        );
        let (commands, command_receiver) = mpsc::channel(16);
        let (event_sender, events) = mpsc::channel(64);
        let engine = ChatEngine::new(session, preferences, event_sender, command_receiver);
        Harness {
            commands,
            events,
            handle: tokio::spawn(engine.run()),
        }
    }

    async fn next_snapshot(events: &mut mpsc::Receiver<ChatEvent>) -> SessionSnapshot {
        match events.recv().await {
            Some(ChatEvent::StateChanged(snapshot)) => *snapshot,
            None => panic!("engine stopped unexpectedly"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_initial_snapshot() {
        let mut harness = spawn_engine(None);
        let snapshot = next_snapshot(&mut harness.events).await;
        assert!(snapshot.selected.is_none());
        assert_eq!(snapshot.contacts.len(), ContactDirectory::builtin().all().len());
    }

    #[tokio::test(start_paused = true)]
    async fn drives_receipts_typing_and_reply_on_schedule() {
        let mut harness = spawn_engine(None);
        next_snapshot(&mut harness.events).await;

        harness
            .commands
            .send(ChatCommand::SelectContact(ContactId(1)))
            .await
            .unwrap();
        let opened = next_snapshot(&mut harness.events).await;
        assert_eq!(opened.selected.map(|c| c.id), Some(ContactId(1)));
        assert!(opened.messages.is_empty());

        let sent_at = Instant::now();
        harness
            .commands
            .send(ChatCommand::SendMessage("hello there".into()))
            .await
            .unwrap();
        let sent = next_snapshot(&mut harness.events).await;
        assert_eq!(sent.messages.len(), 1);
        assert_eq!(sent.messages[0].status, MessageStatus::Sent);

        let mut statuses = vec![MessageStatus::Sent];
        let mut saw_typing = false;
        let final_snapshot = loop {
            let snapshot = next_snapshot(&mut harness.events).await;
            let status = snapshot.messages[0].status;
            if statuses.last() != Some(&status) {
                statuses.push(status);
            }
            if snapshot.messages.len() == 2 {
                break snapshot;
            }
            if snapshot.typing {
                assert_eq!(statuses.last(), Some(&MessageStatus::Read));
                saw_typing = true;
            }
        };

        assert!(saw_typing);
        assert_eq!(
            statuses,
            vec![MessageStatus::Sent, MessageStatus::Received, MessageStatus::Read]
        );
        assert!(!final_snapshot.typing);
        assert_eq!(final_snapshot.messages[1].text, "Hey! Kem che? 😊");
        assert!(sent_at.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn blank_send_changes_nothing() {
        let mut harness = spawn_engine(None);
        next_snapshot(&mut harness.events).await;

        harness
            .commands
            .send(ChatCommand::SelectContact(ContactId(2)))
            .await
            .unwrap();
        next_snapshot(&mut harness.events).await;
        harness
            .commands
            .send(ChatCommand::SendMessage("   ".into()))
            .await
            .unwrap();
        let snapshot = next_snapshot(&mut harness.events).await;
        assert!(snapshot.messages.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn search_and_close_are_reflected() {
        let mut harness = spawn_engine(None);
        next_snapshot(&mut harness.events).await;

        harness
            .commands
            .send(ChatCommand::SetSearchTerm("PRI".into()))
            .await
            .unwrap();
        let filtered = next_snapshot(&mut harness.events).await;
        let names: Vec<_> = filtered.contacts.iter().map(|c| c.contact.name.as_str()).collect();
        assert_eq!(names, vec!["Priya Shah"]);

        harness
            .commands
            .send(ChatCommand::SelectContact(ContactId(2)))
            .await
            .unwrap();
        assert!(next_snapshot(&mut harness.events).await.selected.is_some());
        harness
            .commands
            .send(ChatCommand::CloseConversation)
            .await
            .unwrap();
        assert!(next_snapshot(&mut harness.events).await.selected.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn toggled_theme_is_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.db");
        let mut harness = spawn_engine(Some(PreferenceStore::open(&path).unwrap()));
        next_snapshot(&mut harness.events).await;

        harness.commands.send(ChatCommand::ToggleTheme).await.unwrap();
        let snapshot = next_snapshot(&mut harness.events).await;
        assert_eq!(snapshot.theme, ThemePreference::Dark);

        drop(harness.commands);
        harness.handle.await.unwrap();

        let reopened = PreferenceStore::open(&path).unwrap();
        assert_eq!(reopened.theme().unwrap(), ThemePreference::Dark);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_ui_goes_away() {
        let harness = spawn_engine(None);
        drop(harness.events);
        harness.handle.await.unwrap();
    }
}
