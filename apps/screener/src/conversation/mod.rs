pub mod handlers;
pub mod machine;
pub mod messages;
pub mod store;
pub mod turn;

pub use machine::{ConversationManager, Session};
pub use store::{spawn_sweeper, SessionStore};
