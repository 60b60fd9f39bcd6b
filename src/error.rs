use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("{axis} axis index {index} is out of range (axis count: {len})")]
    AxisIndexOutOfRange {
        axis: &'static str,
        index: usize,
        len: usize,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
