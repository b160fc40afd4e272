use std::collections::HashMap;
use std::time::Duration;

use crate::common::{
    Contact, ContactId, ContactSummary, Message, MessageId, MessageStatus, SessionSnapshot,
    ThemePreference,
};

use super::conversation::ConversationStore;
use super::directory::ContactDirectory;
use super::reply::ReplySelector;
use super::scheduler::{DeliveryDelays, LifecycleScheduler, ScheduledTask, Transition};

/// Produces the display string stamped on new messages.
pub type Clock = Box<dyn Fn() -> String + Send>;

pub fn display_time() -> String {
    chrono::Local::now().format("%-I:%M %p").to_string()
}

/// The whole chat state machine: directory, conversations, pending
/// transitions and the UI-facing selection/search/theme state.
///
/// Every time-dependent call takes `now`, an offset from the session's origin.
pub struct ChatSession {
    directory: ContactDirectory,
    conversations: ConversationStore,
    scheduler: LifecycleScheduler,
    replies: ReplySelector,
    clock: Clock,
    selected: Option<ContactId>,
    /// Outstanding typing indications per contact. Overlapping replies to the
    /// same contact keep the indicator up until the last one lands.
    typing: HashMap<ContactId, u32>,
    search_term: String,
    theme: ThemePreference,
}

impl ChatSession {
    pub fn new(
        directory: ContactDirectory,
        delays: DeliveryDelays,
        replies: ReplySelector,
        theme: ThemePreference,
    ) -> Self {
        Self {
            directory,
            conversations: ConversationStore::new(),
            scheduler: LifecycleScheduler::new(delays),
            replies,
            clock: Box::new(display_time),
            selected: None,
            typing: HashMap::new(),
            search_term: String::new(),
            theme,
        }
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<ContactId> {
        self.selected
    }

    #[cfg(test)]
    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    /// Unknown ids are ignored.
    pub fn select_contact(&mut self, contact_id: ContactId) -> bool {
        if self.directory.get(contact_id).is_none() {
            log::warn!("Ignoring selection of unknown contact {contact_id}");
            return false;
        }
        if self.conversations.ensure_conversation(contact_id) {
            log::debug!("Opened new conversation with contact {contact_id}");
        }
        self.selected = Some(contact_id);
        true
    }

    pub fn close_conversation(&mut self) {
        self.selected = None;
    }

    /// Appends an own message to the selected conversation and arms its
    /// transitions. Blank text or no selection is a silent no-op.
    pub fn send_message(&mut self, text: &str, now: Duration) -> Option<MessageId> {
        if text.trim().is_empty() {
            return None;
        }
        let contact_id = self.selected?;
        let online = self.directory.get(contact_id)?.online;

        let message = Message::outgoing(text.to_string(), (self.clock)());
        let message_id = message.id;
        if !self.conversations.append_message(contact_id, message) {
            return None;
        }
        self.scheduler.arm(contact_id, message_id, now, online);
        log::debug!("Sent message {message_id} to contact {contact_id} (online: {online})");
        Some(message_id)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn toggle_theme(&mut self) -> ThemePreference {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub fn pending_transitions(&self) -> usize {
        self.scheduler.pending()
    }

    /// Applies every transition due at or before `now`, earliest first.
    /// Returns how many were applied.
    pub fn advance(&mut self, now: Duration) -> usize {
        let mut applied = 0;
        while let Some(task) = self.scheduler.pop_due(now) {
            self.apply(task);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, task: ScheduledTask) {
        let ScheduledTask {
            contact_id,
            message_id,
            kind,
            ..
        } = task;

        match kind {
            Transition::Received => {
                self.conversations
                    .set_message_status(contact_id, message_id, MessageStatus::Received);
            }
            Transition::Read => {
                self.conversations
                    .set_message_status(contact_id, message_id, MessageStatus::Read);
            }
            Transition::TypingStarted => {
                *self.typing.entry(contact_id).or_default() += 1;
            }
            Transition::Reply => {
                self.finish_typing(contact_id);
                let Some(user_text) = self
                    .conversations
                    .find_message(contact_id, message_id)
                    .map(|message| message.text.clone())
                else {
                    log::debug!("Reply target {message_id} missing, skipping");
                    return;
                };
                let reply = self.replies.select_reply(&user_text);
                self.conversations
                    .append_message(contact_id, Message::incoming(reply, (self.clock)()));
            }
        }
        log::debug!("Applied {kind:?} for message {message_id} (contact {contact_id})");
    }

    fn finish_typing(&mut self, contact_id: ContactId) {
        if let Some(count) = self.typing.get_mut(&contact_id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.typing.remove(&contact_id);
            }
        }
    }

    pub fn is_typing(&self, contact_id: ContactId) -> bool {
        self.typing.contains_key(&contact_id)
    }

    pub fn filtered_contacts(&self) -> Vec<&Contact> {
        self.directory.filter(&self.search_term)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let contacts = self
            .filtered_contacts()
            .into_iter()
            .map(|contact| ContactSummary {
                contact: contact.clone(),
                preview: self.conversations.last_message_preview(contact.id),
                last_timestamp: self.conversations.last_message_timestamp(contact.id),
                selected: self.selected == Some(contact.id),
            })
            .collect();

        let selected = self
            .selected
            .and_then(|id| self.directory.get(id))
            .cloned();
        let (messages, typing) = match self.selected {
            Some(id) => (self.conversations.messages(id).to_vec(), self.is_typing(id)),
            None => (Vec::new(), false),
        };

        SessionSnapshot {
            contacts,
            selected,
            messages,
            typing,
            search_term: self.search_term.clone(),
            theme: self.theme,
        }
    }
}
