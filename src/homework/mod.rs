//! 作业响应处理 - 校验 API 响应、映射审核状态

pub mod response;
pub mod status;
pub mod verdict;

pub use response::check_response;
pub use status::{parse_status, EMPTY_HOMEWORKS_MESSAGE};
pub use verdict::HomeworkStatus;
