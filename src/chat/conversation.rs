use std::collections::HashMap;

use crate::common::{ContactId, Message, MessageId, MessageStatus};

pub const PREVIEW_MAX_CHARS: usize = 30;
pub const EMPTY_PREVIEW: &str = "No messages yet";

/// Per-contact message history. Append-only; conversations are created lazily
/// the first time their contact is opened.
#[derive(Debug, Default)]
pub struct ConversationStore {
    conversations: HashMap<ContactId, Vec<Message>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when a new, empty conversation was created.
    pub fn ensure_conversation(&mut self, contact_id: ContactId) -> bool {
        if self.conversations.contains_key(&contact_id) {
            return false;
        }
        self.conversations.insert(contact_id, Vec::new());
        true
    }

    #[cfg(test)]
    pub fn has_conversation(&self, contact_id: ContactId) -> bool {
        self.conversations.contains_key(&contact_id)
    }

    /// No-op when the contact has never been opened.
    pub fn append_message(&mut self, contact_id: ContactId, message: Message) -> bool {
        match self.conversations.get_mut(&contact_id) {
            Some(messages) => {
                messages.push(message);
                true
            }
            None => {
                log::debug!("Dropping message for contact {contact_id}: no conversation");
                false
            }
        }
    }

    /// Moves the message forward to `status`. Missing messages and backward
    /// transitions are ignored.
    pub fn set_message_status(
        &mut self,
        contact_id: ContactId,
        message_id: MessageId,
        status: MessageStatus,
    ) -> bool {
        let Some(message) = self
            .conversations
            .get_mut(&contact_id)
            .and_then(|messages| messages.iter_mut().find(|m| m.id == message_id))
        else {
            return false;
        };

        if status <= message.status {
            return false;
        }
        message.status = status;
        true
    }

    pub fn messages(&self, contact_id: ContactId) -> &[Message] {
        self.conversations
            .get(&contact_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn find_message(&self, contact_id: ContactId, message_id: MessageId) -> Option<&Message> {
        self.messages(contact_id).iter().find(|m| m.id == message_id)
    }

    pub fn last_message_preview(&self, contact_id: ContactId) -> String {
        match self.messages(contact_id).last() {
            Some(message) => truncate_preview(&message.text),
            None => EMPTY_PREVIEW.to_string(),
        }
    }

    pub fn last_message_timestamp(&self, contact_id: ContactId) -> String {
        self.messages(contact_id)
            .last()
            .map(|message| message.timestamp.clone())
            .unwrap_or_default()
    }
}

/// Counts characters, not bytes, so multi-byte text never splits mid-char.
fn truncate_preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_MAX_CHARS {
        return text.to_string();
    }
    let mut preview: String = text.chars().take(PREVIEW_MAX_CHARS).collect();
    preview.push_str("...");
    preview
}
