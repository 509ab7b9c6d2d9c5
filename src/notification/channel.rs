//! 通知渠道 trait 与尽力投递的 Notifier

use anyhow::Result;
use tracing::{debug, error};

/// 发送结果
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    /// 发送成功
    Sent,
    /// 发送失败（已记录日志）
    Failed(String),
}

impl SendResult {
    pub fn is_sent(&self) -> bool {
        matches!(self, SendResult::Sent)
    }
}

/// 通知渠道 trait
pub trait NotificationChannel {
    /// 渠道名称（用于日志）
    fn name(&self) -> &str;

    /// 同步发送纯文本消息
    fn send(&self, text: &str) -> Result<()>;
}

/// 包装渠道，吞掉所有投递失败
pub struct Notifier<C> {
    channel: C,
}

impl<C: NotificationChannel> Notifier<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// 发送消息；失败只写 error 日志，不向调用方传播
    pub fn send_message(&self, message: &str) -> SendResult {
        match self.channel.send(message) {
            Ok(()) => {
                debug!(channel = %self.channel.name(), "Успешная отправка сообщения в Telegram");
                SendResult::Sent
            }
            Err(e) => {
                error!(
                    channel = %self.channel.name(),
                    error = ?e,
                    "Отсутствует доступ к серверу Telegram"
                );
                SendResult::Failed(format!("{:#}", e))
            }
        }
    }
}
