//! 生成后端抽象
//!
//! 所有后端（OpenAI 兼容 / Mock）实现 LlmClient：prompt 进，文本出；失败以 LlmError 表示。
//! 成功但内容为空（Ok("")）与调用失败（Err）是两条不同的路径，由 ReplyGenerator 分别兜底。

use async_trait::async_trait;
use thiserror::Error;

/// 生成后端调用失败的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    Request(String),

    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),

    #[error("LLM backend unavailable: {0}")]
    Unavailable(String),
}

/// 生成后端 trait：一个 Coordinator 在构造时绑定唯一实现，调用期间不切换
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// 非流式完成
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// 后端标识（日志用），如 "openai:gpt-4o-mini"
    fn name(&self) -> String;

    /// 获取累计 token 使用统计：(prompt_tokens, completion_tokens, total_tokens)
    /// 默认返回 (0, 0, 0)，具体实现可覆盖
    fn token_usage(&self) -> (u64, u64, u64) {
        (0, 0, 0)
    }
}
