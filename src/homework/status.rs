//! 作业状态解析与消息格式化

use super::verdict::HomeworkStatus;
use crate::error::{PollError, SubmissionDefect};
use serde_json::Value;

/// 作业列表为空时的消息
pub const EMPTY_HOMEWORKS_MESSAGE: &str = "Ответ API пуст: нет домашних работ.";

const NAME_KEY: &str = "homework_name";
const STATUS_KEY: &str = "status";

/// 从单条作业记录中提取状态，生成通知文本
pub fn parse_status(homework: &Value) -> Result<String, PollError> {
    let name = field(homework, NAME_KEY)?;
    let status = field(homework, STATUS_KEY)?;

    let name = name
        .as_str()
        .ok_or(PollError::UnparseableSubmission(SubmissionDefect::WrongType(NAME_KEY)))?;
    let code = status
        .as_str()
        .ok_or(PollError::UnparseableSubmission(SubmissionDefect::WrongType(STATUS_KEY)))?;

    let status = HomeworkStatus::from_code(code).ok_or_else(|| {
        PollError::UnparseableSubmission(SubmissionDefect::UnknownStatus(code.to_string()))
    })?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}

fn field<'a>(homework: &'a Value, key: &'static str) -> Result<&'a Value, PollError> {
    homework
        .get(key)
        .ok_or(PollError::UnparseableSubmission(SubmissionDefect::MissingKey(key)))
}
