use super::types::SessionSnapshot;

/// Updates the chat engine publishes to the UI.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    StateChanged(Box<SessionSnapshot>),
}
