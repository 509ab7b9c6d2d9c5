//! 配置加载测试

use homework_bot::config::{
    EnvCredentials, PRACTICUM_TOKEN_VAR, TELEGRAM_CHAT_ID_VAR, TELEGRAM_TOKEN_VAR,
};
use homework_bot::ConfigError;
use std::fs;
use tempfile::TempDir;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_load_from_dotenv_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    fs::write(
        &path,
        "PRACTICUM_TOKEN=practicum\nTELEGRAM_TOKEN=bot-token\nTELEGRAM_CHAT_ID=42\n",
    )
    .unwrap();

    let creds = EnvCredentials::load_with(&path, no_env);
    assert!(creds.check_tokens());

    let creds = creds.into_credentials().unwrap();
    assert_eq!(creds.practicum_token(), "practicum");
    assert_eq!(creds.telegram_token(), "bot-token");
    assert_eq!(creds.telegram_chat_id(), "42");
}

#[test]
fn test_environment_overrides_dotenv_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "PRACTICUM_TOKEN=from-file\nTELEGRAM_CHAT_ID=1\n").unwrap();

    let creds = EnvCredentials::load_with(&path, |key| match key {
        PRACTICUM_TOKEN_VAR => Some("from-env".to_string()),
        TELEGRAM_TOKEN_VAR => Some("bot".to_string()),
        _ => None,
    });

    assert_eq!(creds.practicum_token.as_deref(), Some("from-env"));
    assert_eq!(creds.telegram_token.as_deref(), Some("bot"));
    assert_eq!(creds.telegram_chat_id.as_deref(), Some("1"));
}

#[test]
fn test_missing_dotenv_file_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let creds = EnvCredentials::load_with(&dir.path().join(".env"), no_env);

    assert!(!creds.check_tokens());
    assert_eq!(
        creds.into_credentials().unwrap_err(),
        ConfigError::Missing(vec![PRACTICUM_TOKEN_VAR, TELEGRAM_TOKEN_VAR, TELEGRAM_CHAT_ID_VAR])
    );
}

#[test]
fn test_empty_value_in_file_counts_as_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "PRACTICUM_TOKEN=\nTELEGRAM_TOKEN=bot\nTELEGRAM_CHAT_ID=42\n").unwrap();

    let creds = EnvCredentials::load_with(&path, no_env);
    assert!(!creds.check_tokens());
    assert_eq!(creds.missing(), vec![PRACTICUM_TOKEN_VAR]);
}

#[test]
fn test_malformed_lines_are_skipped() {
    // Given: 有效行之间夹着无法解析的行
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    fs::write(
        &path,
        "PRACTICUM_TOKEN=practicum\n=orphan-value\nTELEGRAM_TOKEN=bot\nnot a pair\nTELEGRAM_CHAT_ID=42\n",
    )
    .unwrap();

    // When: 加载
    let creds = EnvCredentials::load_with(&path, no_env);

    // Then: 坏行被跳过，有效行全部保留
    assert!(creds.check_tokens());
    assert_eq!(creds.telegram_token.as_deref(), Some("bot"));
    assert_eq!(creds.telegram_chat_id.as_deref(), Some("42"));
}

#[test]
fn test_environment_still_used_when_file_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "=broken\n").unwrap();

    let creds = EnvCredentials::load_with(&path, |key| Some(format!("{}-value", key)));

    assert!(creds.check_tokens());
    assert_eq!(creds.practicum_token.as_deref(), Some("PRACTICUM_TOKEN-value"));
}
