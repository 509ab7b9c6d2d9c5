//! Яндекс.Практикум API 客户端
//!
//! 所有失败（传输、非 200、解码）统一为 `PollError::ServerUnreachable`，
//! 具体原因只进入日志。

use crate::config::ENDPOINT;
use crate::error::{PollError, UnreachableCause};
use anyhow::{anyhow, Result};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// 轮询接口抽象，便于替换为测试实现
pub trait HomeworkApi {
    /// 请求 `from_date` 之后的作业状态，返回解码后的响应体
    fn get_api_answer(&self, timestamp: i64) -> Result<Value, PollError>;
}

/// 客户端配置
#[derive(Debug, Clone)]
pub struct PracticumConfig {
    /// 接口地址
    pub endpoint: String,
    /// OAuth token
    pub token: String,
    /// 请求超时，None 表示不设超时
    pub timeout: Option<Duration>,
}

impl PracticumConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            endpoint: ENDPOINT.to_string(),
            token: token.into(),
            timeout: None,
        }
    }

    /// 替换接口地址
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// 基于 reqwest 阻塞客户端的实现
pub struct PracticumClient {
    client: reqwest::blocking::Client,
    config: PracticumConfig,
}

impl PracticumClient {
    pub fn new(config: PracticumConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| anyhow!("Cannot create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &PracticumConfig {
        &self.config
    }

    fn request(&self, timestamp: i64) -> Result<Value, UnreachableCause> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .header("Authorization", format!("OAuth {}", self.config.token))
            .query(&[("from_date", timestamp)])
            .send()
            .map_err(UnreachableCause::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(UnreachableCause::Status(status));
        }

        response.json::<Value>().map_err(UnreachableCause::Decode)
    }
}

impl HomeworkApi for PracticumClient {
    fn get_api_answer(&self, timestamp: i64) -> Result<Value, PollError> {
        debug!(endpoint = %self.config.endpoint, from_date = timestamp, "Requesting homework statuses");

        self.request(timestamp).map_err(|cause| {
            warn!(endpoint = %self.config.endpoint, cause = %cause, "Homework API request failed");
            PollError::unreachable(cause)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = PracticumConfig::new("token");
        assert_eq!(config.endpoint, ENDPOINT);
        assert_eq!(config.token, "token");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_config_overrides() {
        let config = PracticumConfig::new("token")
            .with_endpoint("http://127.0.0.1:9/")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.endpoint, "http://127.0.0.1:9/");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_transport_failure_is_unreachable() {
        // 端口 1 上没有服务，连接会被拒绝
        let config = PracticumConfig::new("token")
            .with_endpoint("http://127.0.0.1:1/")
            .with_timeout(Duration::from_secs(5));
        let client = PracticumClient::new(config).unwrap();

        match client.get_api_answer(0) {
            Err(PollError::ServerUnreachable { cause: UnreachableCause::Transport(_) }) => {}
            other => panic!("expected transport failure, got {:?}", other),
        }
    }
}
