use thiserror::Error;

use crate::Coordinate;

// 错误类型
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("coordinate {0} is outside the China bounding box")]
    OutOfChina(Coordinate),
    #[error("refinement stopped after {iterations} iterations with residual {residual:e}")]
    NotConverged { iterations: u32, residual: f64 },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
