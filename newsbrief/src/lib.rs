//! # AI news summarizer bot
//!
//! Takes a news article reference (a URL, or a topic keyword resolved via
//! search) through a fixed analysis chain — extract, summarize, title, tone,
//! category — and delivers a formatted report over Telegram with live
//! progress shown in a single editable status message.

pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod handlers;
pub mod pipeline;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

pub use core::{
    Bot, BotError, Chat, Handler, HandlerError, HandlerResponse, Message, MessageDirection,
    RenderMode, ToCoreMessage, ToCoreUser, User, init_tracing,
};

pub use chain::HandlerChain;

pub use telegram::{run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};

pub use config::{BotConfig, BotMode};
pub use runner::run_bot;

pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use handlers::{NewsHandler, StartHandler};
pub use pipeline::{
    AnalysisResult, ArticlePipeline, NoProgress, Phase, PipelineError, ProgressReporter,
    ProgressSink, Report, Stage, Tone, CATEGORY_LABELS,
};
