//! Homework Bot
//!
//! 每 10 分钟查询一次作业审核状态，状态变化时发送 Telegram 消息

use anyhow::Result;
use homework_bot::{
    EnvCredentials, HomeworkWatcher, Notifier, PracticumClient, PracticumConfig, TelegramChannel,
    TelegramConfig, RETRY_PERIOD,
};
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("homework_bot=debug"));

    fmt()
        .with_writer(std::io::stdout)
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Homework bot starting");

    let credentials = match EnvCredentials::load(Path::new(".env")).into_credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!(
                severity = "critical",
                error = %e,
                "Отсутствует обязательная переменная окружения. Программа принудительно остановлена."
            );
            std::process::exit(1);
        }
    };

    info!(chat_id = %credentials.telegram_chat_id(), "Credentials loaded");

    let api = PracticumClient::new(PracticumConfig::new(credentials.practicum_token()))?;
    let channel = TelegramChannel::new(TelegramConfig::from_credentials(&credentials))?;

    let mut watcher = HomeworkWatcher::new(api, Notifier::new(channel), RETRY_PERIOD);
    watcher.run()
}
