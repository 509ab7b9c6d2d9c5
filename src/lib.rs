//! Homework Bot - 轮询 Яндекс.Практикум 作业状态并通过 Telegram 通知变化

pub mod config;
pub mod error;
pub mod homework;
pub mod notification;
pub mod practicum;
pub mod watcher;

pub use config::{Credentials, EnvCredentials, ENDPOINT, RETRY_PERIOD};
pub use error::{ConfigError, PollError, SubmissionDefect, UnreachableCause};
pub use homework::{check_response, parse_status, HomeworkStatus, EMPTY_HOMEWORKS_MESSAGE};
pub use notification::{NotificationChannel, Notifier, SendResult, TelegramChannel, TelegramConfig};
pub use practicum::{HomeworkApi, PracticumClient, PracticumConfig};
pub use watcher::{failure_message, HomeworkWatcher, PollState};
