pub mod commands;
pub mod events;
pub mod types;

pub use commands::ChatCommand;
pub use events::ChatEvent;
pub use types::{
    Contact, ContactId, ContactSummary, Message, MessageId, MessageStatus, SessionSnapshot,
    ThemePreference,
};
