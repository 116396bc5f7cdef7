mod message;
mod session;

pub use message::{ChatMessage, Role};
pub use session::Session;
