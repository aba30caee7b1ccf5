mod discord;
mod logging;

pub use discord::DiscordWebhook;
pub use logging::LoggingWebhook;
