//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("节点不存在: {0}")]
    NodeNotFound(String),

    #[error("边不存在: {0}")]
    EdgeNotFound(String),

    #[error("边键已存在: {0}")]
    EdgeKeyExists(String),

    #[error("无效参数: {0}")]
    InvalidArgument(String),

    #[error("该图类型不支持此操作: {0}")]
    NotImplemented(String),

    #[error("图中不存在{0}")]
    NoArborescence(String),

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("CSV 错误: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}
