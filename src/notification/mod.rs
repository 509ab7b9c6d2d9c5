//! 通知层 - 将文本消息投递到聊天渠道
//!
//! 投递是尽力而为的：失败只记录日志，不会向轮询循环抛出。

pub mod channel;
pub mod channels;

pub use channel::{NotificationChannel, Notifier, SendResult};
pub use channels::{TelegramChannel, TelegramConfig};
