//! Telegram transport: teloxide adapter for the core Bot trait, message
//! conversion, MarkdownV2 text handling, and the REPL runner.

pub mod adapters;
pub mod bot_adapter;
pub mod markdown;
pub mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use runner::run_repl;
