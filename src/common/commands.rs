use super::types::ContactId;

/// Intents the UI forwards to the chat engine.
#[derive(Debug, Clone)]
pub enum ChatCommand {
    SelectContact(ContactId),
    /// Back button: leave the conversation view without touching its history.
    CloseConversation,
    SendMessage(String),
    SetSearchTerm(String),
    ToggleTheme,
}
