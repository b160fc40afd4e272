//! Chat state machine. Pure in-memory logic with no IO or clocks of its own.

pub mod conversation;
pub mod directory;
pub mod reply;
pub mod scheduler;
pub mod session;

pub use directory::ContactDirectory;
pub use reply::ReplySelector;
pub use scheduler::DeliveryDelays;
pub use session::ChatSession;
