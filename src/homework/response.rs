//! API 响应结构校验

use crate::error::PollError;
use serde_json::Value;

/// 检查响应是否符合接口文档，返回作业列表（可能为空）
///
/// 校验顺序：
/// 1. 响应必须是 JSON 对象
/// 2. 必须包含 `homeworks` 键
/// 3. `homeworks` 必须是数组
pub fn check_response(response: &Value) -> Result<&[Value], PollError> {
    let object = response.as_object().ok_or(PollError::InvalidResponseShape)?;
    let homeworks = object.get("homeworks").ok_or(PollError::MissingField)?;
    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or(PollError::InvalidResponseShape)
}
