//! Coordinator：固定顺序编排单次请求并组装响应
//!
//! RECEIVE → RECORD_USER_MESSAGE → CLASSIFY → READ_CONTEXT → GENERATE_REPLY → CHECK_ESCALATION
//! → RECORD_AGENT_REPLY → RESPOND
//!
//! 整个序列持有同一把锁，同一 Coordinator 上的并发 ask 不会交错读写记忆。
//! 用户消息先写入再读上下文，所以回复生成能看到本轮消息；回复在生成完成后才写入，不会出现在自身上下文里。

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::core::{DeskError, PipelineStage};
use crate::llm::{create_llm_from_config, LlmClient};
use crate::memory::{ConversationMemory, Message, Role};
use crate::triage::{
    EscalationDecision, EscalationPolicy, Intent, IntentClassifier, ReplyGenerator, Urgency,
};

/// 返回给调用方的响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub intent: Intent,
    pub urgency: Urgency,
    pub reply: String,
    pub escalation: EscalationDecision,
}

pub struct Coordinator {
    classifier: IntentClassifier,
    reply: ReplyGenerator,
    escalation: EscalationPolicy,
    memory: Mutex<ConversationMemory>,
    llm: Arc<dyn LlmClient>,
    reply_timeout: Duration,
}

impl Coordinator {
    pub fn new(llm: Arc<dyn LlmClient>, reply_timeout: Duration) -> Self {
        Self {
            classifier: IntentClassifier::new(),
            reply: ReplyGenerator::new(llm.clone()).with_timeout(reply_timeout),
            escalation: EscalationPolicy::new(),
            memory: Mutex::new(ConversationMemory::new()),
            llm,
            reply_timeout,
        }
    }

    /// 按配置构造；缺少凭证等配置错误在此返回，ask 时不再校验
    pub fn from_config(cfg: &AppConfig) -> Result<Self, DeskError> {
        let llm = create_llm_from_config(&cfg.llm)?;
        Ok(Self::new(llm, Duration::from_secs(cfg.llm.timeouts.request)))
    }

    /// 共享同一生成后端、记忆全新的 Coordinator（每会话一个）
    pub fn new_session(&self) -> Self {
        Self::new(self.llm.clone(), self.reply_timeout)
    }

    pub async fn ask(&self, message: &str) -> ResponseEnvelope {
        enter(PipelineStage::Receive);
        let mut memory = self.memory.lock().await;

        enter(PipelineStage::RecordUserMessage);
        memory.add(Role::User, message);

        enter(PipelineStage::Classify);
        let classification = self.classifier.classify(message);

        enter(PipelineStage::ReadContext);
        let context = memory.get_context();

        enter(PipelineStage::GenerateReply);
        let reply = self
            .reply
            .create_reply(message, classification.intent, classification.urgency, &context)
            .await;

        enter(PipelineStage::CheckEscalation);
        let escalation =
            self.escalation
                .check(classification.intent, classification.urgency, message);

        enter(PipelineStage::RecordAgentReply);
        memory.add(Role::Agent, reply.clone());
        drop(memory);

        enter(PipelineStage::Respond);
        tracing::info!(
            intent = %classification.intent,
            urgency = %classification.urgency,
            escalate = escalation.escalate,
            "request triaged"
        );

        ResponseEnvelope {
            intent: classification.intent,
            urgency: classification.urgency,
            reply,
            escalation,
        }
    }

    /// 当前保留的对话快照
    pub async fn history(&self) -> Vec<Message> {
        self.memory.lock().await.messages().to_vec()
    }

    pub fn backend_name(&self) -> String {
        self.llm.name()
    }
}

fn enter(stage: PipelineStage) {
    tracing::debug!(stage = %stage, "pipeline");
}
