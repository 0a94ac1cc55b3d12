//! 错误类型
//!
//! 只有构造（配置）与投递会失败；单次 ask 流水线本身不向外返回错误，
//! 生成后端的失败在 ReplyGenerator 内部转为兜底回复。

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    /// 配置错误（缺少凭证、未知 provider 等），在构造 Coordinator 时暴露
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
