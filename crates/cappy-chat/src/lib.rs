pub mod assistant;
pub mod builder;
pub mod error;
pub mod messages;
pub mod models;

pub use assistant::{Assistant, Reply, ReplyKind};
pub use builder::AssistantBuilder;
pub use error::{ChatError, Result};
pub use messages::{
    ABOUT_TEXT, FALLBACK_EMPTY_RESPONSE, FALLBACK_UNAVAILABLE, FALLBACK_UNEXPECTED_ERROR,
    GREETING, NEW_CHAT_GREETING,
};
pub use models::{ChatMessage, Role, Session};
