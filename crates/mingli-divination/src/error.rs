use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("历法组件不可用")]
    CalendarUnavailable,
    #[error("历法换算失败：{0}")]
    Calendar(String),
    #[error("无效日期：{0}")]
    InvalidDate(String),
    #[error("暂不支持：{0}")]
    Unsupported(String),
}

pub type ChartResult<T> = std::result::Result<T, ChartError>;
