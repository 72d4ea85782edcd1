/// Bot configuration loaded from environment variables
pub mod bot;

pub use bot::{BotConfig, CommandRegistration, load_bot_config};
