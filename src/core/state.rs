//! 流水线阶段
//!
//! 单次 ask 严格按线性顺序经过以下阶段，不可跳过或重排；Coordinator 进入每个阶段时记录一条 debug 日志。

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Receive,
    RecordUserMessage,
    Classify,
    ReadContext,
    GenerateReply,
    CheckEscalation,
    RecordAgentReply,
    Respond,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Receive => "RECEIVE",
            PipelineStage::RecordUserMessage => "RECORD_USER_MESSAGE",
            PipelineStage::Classify => "CLASSIFY",
            PipelineStage::ReadContext => "READ_CONTEXT",
            PipelineStage::GenerateReply => "GENERATE_REPLY",
            PipelineStage::CheckEscalation => "CHECK_ESCALATION",
            PipelineStage::RecordAgentReply => "RECORD_AGENT_REPLY",
            PipelineStage::Respond => "RESPOND",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        let stages = [
            (PipelineStage::Receive, "RECEIVE"),
            (PipelineStage::RecordUserMessage, "RECORD_USER_MESSAGE"),
            (PipelineStage::Classify, "CLASSIFY"),
            (PipelineStage::ReadContext, "READ_CONTEXT"),
            (PipelineStage::GenerateReply, "GENERATE_REPLY"),
            (PipelineStage::CheckEscalation, "CHECK_ESCALATION"),
            (PipelineStage::RecordAgentReply, "RECORD_AGENT_REPLY"),
            (PipelineStage::Respond, "RESPOND"),
        ];
        for (stage, name) in stages {
            assert_eq!(stage.as_str(), name);
            assert_eq!(stage.to_string(), name);
        }
    }
}
