//! 分诊阶段：意图识别、升级判定、回复生成
//!
//! IntentClassifier 与 EscalationPolicy 是纯规则、无副作用的同步函数；
//! ReplyGenerator 是流水线中唯一会挂起的阶段（调用生成后端）。

pub mod escalation;
pub mod intent;
pub mod reply;

pub use escalation::{EscalationDecision, EscalationPolicy};
pub use intent::{ClassificationResult, Intent, IntentClassifier, Urgency};
pub use reply::{ReplyGenerator, CONNECTION_ISSUE_REPLY, NEED_MORE_DETAIL_REPLY};
