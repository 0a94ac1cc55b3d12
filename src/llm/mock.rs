//! Mock 生成后端（用于测试与离线模式，无需 API）
//!
//! 按预设行为返回：回显、固定回复、空回复、失败或长时间挂起；并记录收到的每条 prompt。

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::llm::{LlmClient, LlmError};

/// Mock 行为
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// 回显 prompt 中的用户消息
    Echo,
    /// 固定回复
    Reply(String),
    /// 成功但内容为空
    Empty,
    /// 调用失败
    Fail(LlmError),
    /// 挂起指定时长后再回复（用于超时测试）
    Stall(Duration),
}

/// Mock 客户端
#[derive(Debug)]
pub struct MockLlmClient {
    behavior: MockBehavior,
    prompts: Mutex<Vec<String>>,
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new(MockBehavior::Echo)
    }
}

impl MockLlmClient {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Reply(text.into()))
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fail(LlmError::Unavailable(reason.into())))
    }

    /// 已收到的 prompt（按调用顺序）
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    fn record(&self, prompt: &str) {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
    }
}

/// 取 prompt 中 "User message:" 之后的一行作为用户原话
fn user_message_of(prompt: &str) -> &str {
    prompt
        .split_once("User message:\n")
        .and_then(|(_, rest)| rest.lines().next())
        .unwrap_or("(no input)")
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn name(&self) -> String {
        "mock".to_string()
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.record(prompt);
        match &self.behavior {
            MockBehavior::Echo => Ok(format!(
                "Echo from Mock: {}",
                user_message_of(prompt)
            )),
            MockBehavior::Reply(text) => Ok(text.clone()),
            MockBehavior::Empty => Ok(String::new()),
            MockBehavior::Fail(err) => Err(err.clone()),
            MockBehavior::Stall(d) => {
                tokio::time::sleep(*d).await;
                Ok("late reply".to_string())
            }
        }
    }
}
