//! 错误类型
//!
//! 轮询循环内的错误全部可恢复，对用户只展示固定文本；
//! 具体原因保留在 `source()` 链中，仅用于日志。

use thiserror::Error;

/// 启动配置错误（致命，不进入轮询循环）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Отсутствует обязательная переменная окружения: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// 轮询过程中的可恢复错误
#[derive(Error, Debug)]
pub enum PollError {
    /// 传输失败、非 200 状态码或响应体解码失败
    #[error("Отсутствует доступ к серверу Яндекс.Практикум")]
    ServerUnreachable {
        #[source]
        cause: UnreachableCause,
    },

    /// 响应不是对象，或 `homeworks` 不是数组
    #[error("Некорректный ответ API")]
    InvalidResponseShape,

    /// 响应缺少 `homeworks` 键
    #[error("Некорректный ответ API")]
    MissingField,

    #[error("Недокументированный статус проверки или отсутствие ключа")]
    UnparseableSubmission(#[source] SubmissionDefect),
}

impl PollError {
    pub fn unreachable(cause: UnreachableCause) -> Self {
        Self::ServerUnreachable { cause }
    }
}

/// ServerUnreachable 的底层原因
#[derive(Error, Debug)]
pub enum UnreachableCause {
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected status code: {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// 作业记录的具体缺陷
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionDefect {
    #[error("missing key `{0}`")]
    MissingKey(&'static str),

    #[error("key `{0}` is not a string")]
    WrongType(&'static str),

    #[error("undocumented status `{0}`")]
    UnknownStatus(String),
}
