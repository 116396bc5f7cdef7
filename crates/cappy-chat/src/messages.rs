// Fixed user-visible texts

pub const GREETING: &str =
    "Hi, I'm Cappy, CapServ Digital Lending's assistant. How can I help you today?";

pub const NEW_CHAT_GREETING: &str = "New chat started. How can I help you today?";

/// Model answered with nothing usable
pub const FALLBACK_EMPTY_RESPONSE: &str = "I apologize, but I'm having trouble generating a response right now. Please try again or contact our human advisors for immediate assistance.";

/// Model call failed; the provider error stays in the logs
pub const FALLBACK_UNEXPECTED_ERROR: &str = "I encountered an unexpected error while processing your request. Please try again or contact our support team for assistance.";

/// No model client is configured
pub const FALLBACK_UNAVAILABLE: &str = "I'm currently experiencing technical difficulties. Please try again later or contact our support team for assistance.";

pub const ABOUT_TEXT: &str = "Cappy is your AI assistant for CapServ Digital Lending.

I can help you with:
- Information about CapServ's services
- Digital lending questions
- Financial technology insights
- General lending guidance";
