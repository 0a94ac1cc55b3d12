//! 回复生成
//!
//! 构造确定性的 prompt（角色指令 + 意图 + 紧急度 + 上下文 + 原始消息），在超时保护下调用生成后端：
//! - 非空文本：原样返回
//! - 成功但为空串：返回「请补充细节」兜底（只含空白的文本视为非空，原样返回）
//! - 调用出错或超时：返回「连接问题」兜底
//!
//! create_reply 永不失败，总是返回可发送的文本。

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::timeout;

use crate::llm::LlmClient;
use crate::triage::{Intent, Urgency};

pub const NEED_MORE_DETAIL_REPLY: &str = "Thanks for reaching out. Could you share more details?";

pub const CONNECTION_ISSUE_REPLY: &str = "Thanks for reaching out. We’re experiencing a connection issue. Please share more details and we’ll follow up shortly.";

/// 默认生成超时（秒）
pub const DEFAULT_REPLY_TIMEOUT_SECS: u64 = 60;

pub struct ReplyGenerator {
    llm: Arc<dyn LlmClient>,
    timeout: Duration,
}

impl ReplyGenerator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            timeout: Duration::from_secs(DEFAULT_REPLY_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build_prompt(message: &str, intent: Intent, urgency: Urgency, context: &str) -> String {
        format!(
            "You are a customer support assistant. \
             Use a concise, professional tone. \
             Provide clear steps and request one piece of missing information if needed. \
             Intent: {intent}. Urgency: {urgency}. \
             Conversation context:\n{context}\n\
             User message:\n{message}\n\
             Write a single reply suitable to send to the customer."
        )
    }

    pub async fn create_reply(
        &self,
        message: &str,
        intent: Intent,
        urgency: Urgency,
        context: &str,
    ) -> String {
        let prompt = Self::build_prompt(message, intent, urgency, context);
        let start = Instant::now();
        let result = timeout(self.timeout, self.llm.complete(&prompt)).await;

        let (reply, outcome, error) = match result {
            Ok(Ok(text)) if !text.is_empty() => (text, "ok", None),
            Ok(Ok(_)) => (NEED_MORE_DETAIL_REPLY.to_string(), "empty", None),
            Ok(Err(e)) => (CONNECTION_ISSUE_REPLY.to_string(), "error", Some(e.to_string())),
            Err(_) => (
                CONNECTION_ISSUE_REPLY.to_string(),
                "timeout",
                Some(format!("no response within {}s", self.timeout.as_secs_f32())),
            ),
        };

        let (prompt_tokens, completion_tokens, total_tokens) = self.llm.token_usage();
        let audit = serde_json::json!({
            "event": "llm_audit",
            "backend": self.llm.name(),
            "outcome": outcome,
            "duration_ms": start.elapsed().as_millis() as u64,
            "prompt_chars": prompt.chars().count(),
            "usage_total": {
                "prompt_tokens": prompt_tokens,
                "completion_tokens": completion_tokens,
                "total_tokens": total_tokens,
            },
        });
        match error {
            Some(err) => tracing::warn!(audit = %audit, error = %err, "reply fallback"),
            None if outcome == "empty" => tracing::warn!(audit = %audit, "reply fallback"),
            None => tracing::info!(audit = %audit, "reply"),
        }

        reply
    }
}
