//! 作业状态监控循环
//!
//! 每轮：请求 API → 校验响应 → 格式化第一条作业 → 与上次发送的消息比较 → 变化时通知。
//! 循环内的任何错误都转为失败通知（同样去重），每轮结束后固定暂停。

use crate::error::PollError;
use crate::homework::{check_response, parse_status, EMPTY_HOMEWORKS_MESSAGE};
use crate::notification::{NotificationChannel, Notifier, SendResult};
use crate::practicum::HomeworkApi;
use std::error::Error as _;
use std::time::Duration;
use tracing::{debug, error, info};

/// 循环状态，只由 watcher 修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// 请求使用的 `from_date`（启动后不再推进）
    pub timestamp: i64,
    /// 最近一次实际发送的消息
    pub last_message: Option<String>,
}

impl PollState {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            last_message: None,
        }
    }

    /// 消息与上次不同时记录并返回 true
    pub fn should_notify(&mut self, message: &str) -> bool {
        if self.last_message.as_deref() == Some(message) {
            return false;
        }
        self.last_message = Some(message.to_string());
        true
    }
}

/// 离开作用域时暂停固定时长，成功和失败路径都会执行
struct PauseGuard {
    period: Duration,
}

impl Drop for PauseGuard {
    fn drop(&mut self) {
        if !self.period.is_zero() {
            std::thread::sleep(self.period);
        }
    }
}

/// 失败通知文本
pub fn failure_message(err: &PollError) -> String {
    format!("Сбой в работе программы: {}", err)
}

/// 作业状态监控器
pub struct HomeworkWatcher<A, C> {
    api: A,
    notifier: Notifier<C>,
    retry_period: Duration,
    state: PollState,
}

impl<A: HomeworkApi, C: NotificationChannel> HomeworkWatcher<A, C> {
    /// 创建监控器，`from_date` 初始化为当前时间减去轮询间隔
    pub fn new(api: A, notifier: Notifier<C>, retry_period: Duration) -> Self {
        let timestamp = chrono::Utc::now().timestamp() - retry_period.as_secs() as i64;
        Self::with_timestamp(api, notifier, retry_period, timestamp)
    }

    /// 使用指定的 `from_date` 创建监控器
    pub fn with_timestamp(
        api: A,
        notifier: Notifier<C>,
        retry_period: Duration,
        timestamp: i64,
    ) -> Self {
        Self {
            api,
            notifier,
            retry_period,
            state: PollState::new(timestamp),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &Notifier<C> {
        &self.notifier
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// 轮询一次，返回要发送的消息
    pub fn poll_once(&self) -> Result<String, PollError> {
        let response = self.api.get_api_answer(self.state.timestamp)?;
        let homeworks = check_response(&response)?;

        match homeworks.first() {
            None => {
                debug!("{}", EMPTY_HOMEWORKS_MESSAGE);
                Ok(EMPTY_HOMEWORKS_MESSAGE.to_string())
            }
            Some(homework) => parse_status(homework),
        }
    }

    /// 执行一轮（不含暂停）
    ///
    /// 返回 `Some` 表示消息有变化并已尝试发送，`None` 表示被去重
    pub fn tick(&mut self) -> Option<SendResult> {
        let message = match self.poll_once() {
            Ok(message) => message,
            Err(e) => {
                error!(error = %e, cause = ?e.source(), "Poll failed");
                failure_message(&e)
            }
        };

        if !self.state.should_notify(&message) {
            debug!("Message unchanged, notification skipped");
            return None;
        }

        info!(message = %message, "Status changed, sending notification");
        Some(self.notifier.send_message(&message))
    }

    /// 执行 n 轮，每轮结束后暂停
    pub fn run_iterations(&mut self, iterations: usize) {
        for _ in 0..iterations {
            self.iterate();
        }
    }

    /// 永久运行
    pub fn run(&mut self) -> ! {
        info!(
            from_date = self.state.timestamp,
            retry_secs = self.retry_period.as_secs(),
            "Homework watcher started"
        );
        loop {
            self.iterate();
        }
    }

    fn iterate(&mut self) {
        let _pause = PauseGuard {
            period: self.retry_period,
        };
        self.tick();
    }
}
