//! 配置加载
//!
//! 凭据读取优先级：
//! 1. 进程环境变量
//! 2. 工作目录下的 `.env` 文件
//!
//! 三个凭据任一缺失或为空都不允许进入轮询循环。

use crate::error::ConfigError;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// 轮询间隔，同时也是首次 `from_date` 的回溯量
pub const RETRY_PERIOD: Duration = Duration::from_secs(600);

/// 作业状态接口
pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Telegram Bot API 基础 URL
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// 从环境读到的原始凭据，可能缺失
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvCredentials {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl EnvCredentials {
    /// 通过自定义查找函数读取（测试中避免修改进程环境）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            practicum_token: lookup(PRACTICUM_TOKEN_VAR),
            telegram_token: lookup(TELEGRAM_TOKEN_VAR),
            telegram_chat_id: lookup(TELEGRAM_CHAT_ID_VAR),
        }
    }

    /// 读取进程环境变量，缺失的项用 dotenv 文件补齐
    ///
    /// dotenv 文件中无法解析的行会被跳过，不会中断启动
    pub fn load(dotenv_path: &Path) -> Self {
        Self::load_with(dotenv_path, |key| std::env::var(key).ok())
    }

    /// 同 [`EnvCredentials::load`]，环境查找可注入
    pub fn load_with<F>(dotenv_path: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_vars = read_dotenv(dotenv_path);
        Self::from_lookup(|key| {
            lookup(key).or_else(|| file_vars.get(key).cloned())
        })
    }

    /// 三个凭据全部存在且非空时返回 true
    pub fn check_tokens(&self) -> bool {
        self.missing().is_empty()
    }

    /// 缺失或为空的变量名
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN_VAR, &self.practicum_token),
            (TELEGRAM_TOKEN_VAR, &self.telegram_token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }

    /// 转换为不可变凭据
    pub fn into_credentials(self) -> Result<Credentials, ConfigError> {
        match (self.practicum_token, self.telegram_token, self.telegram_chat_id) {
            (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id))
                if !practicum_token.is_empty()
                    && !telegram_token.is_empty()
                    && !telegram_chat_id.is_empty() =>
            {
                Ok(Credentials {
                    practicum_token,
                    telegram_token,
                    telegram_chat_id,
                })
            }
            (practicum_token, telegram_token, telegram_chat_id) => {
                let raw = EnvCredentials {
                    practicum_token,
                    telegram_token,
                    telegram_chat_id,
                };
                Err(ConfigError::Missing(raw.missing()))
            }
        }
    }
}

/// 读取 dotenv 文件，文件不存在或无法打开时返回空表
fn read_dotenv(path: &Path) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    if !path.exists() {
        return vars;
    }

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot open dotenv file, skipped");
            return vars;
        }
    };

    for (entry, item) in iter.enumerate() {
        match item {
            Ok((key, value)) => {
                vars.insert(key, value);
            }
            // 读错误之后的内容不可信，停止读取
            Err(dotenvy::Error::Io(e)) => {
                warn!(path = %path.display(), error = %e, "Cannot read dotenv file");
                break;
            }
            // LineParse 的文本包含整行内容（可能是 token），只记录位置
            Err(dotenvy::Error::LineParse(_, column)) => {
                warn!(path = %path.display(), entry, column, "Skipping malformed dotenv line");
            }
            Err(e) => {
                warn!(path = %path.display(), entry, error = %e, "Skipping dotenv entry");
            }
        }
    }
    debug!(path = %path.display(), count = vars.len(), "Loaded dotenv file");
    vars
}

/// 进程生命周期内不可变的凭据
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    practicum_token: String,
    telegram_token: String,
    telegram_chat_id: String,
}

impl Credentials {
    pub fn practicum_token(&self) -> &str {
        &self.practicum_token
    }

    pub fn telegram_token(&self) -> &str {
        &self.telegram_token
    }

    pub fn telegram_chat_id(&self) -> &str {
        &self.telegram_chat_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"***")
            .field("telegram_token", &"***")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}
