pub mod api;
pub mod client;
pub mod command;
pub mod error;

pub use api::{BotApi, Chat, Message, Update, User};
pub use client::BotClient;
pub use command::{parse_command, BotCommand};
pub use error::{Result, TelegramError};
