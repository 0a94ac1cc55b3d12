//! 人工升级判定
//!
//! 规则按顺序评估，escalate 取各规则的 OR：
//! 1. 紧急度为 high → 升级，说明为 "High urgency <intent> issue detected."
//! 2. 消息（不区分大小写）含法律威胁关键词 → 升级，说明为 "Legal threat detected."，覆盖规则 1 的说明
//! 3. 其余 → 不升级
//!
//! 关键词同样是子串匹配，"issue" 含 "sue" 会被判为法律威胁（已知误触发）。

use serde::{Deserialize, Serialize};

use crate::triage::{Intent, Urgency};

const LEGAL_THREAT_KEYWORDS: &[&str] = &["lawyer", "sue"];

pub const LEGAL_THREAT_NOTE: &str = "Legal threat detected.";
pub const NO_ESCALATION_NOTE: &str = "No escalation required.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationDecision {
    pub escalate: bool,
    pub note: String,
}

impl EscalationDecision {
    fn none() -> Self {
        Self {
            escalate: false,
            note: NO_ESCALATION_NOTE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EscalationPolicy;

impl EscalationPolicy {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, intent: Intent, urgency: Urgency, message: &str) -> EscalationDecision {
        let mut decision = EscalationDecision::none();

        if urgency == Urgency::High {
            decision = EscalationDecision {
                escalate: true,
                note: format!("High urgency {intent} issue detected."),
            };
        }

        // 法律威胁严重度最高，其说明总是胜出
        if is_legal_threat(message) {
            decision = EscalationDecision {
                escalate: true,
                note: LEGAL_THREAT_NOTE.to_string(),
            };
        }

        decision
    }
}

fn is_legal_threat(message: &str) -> bool {
    let msg = message.to_lowercase();
    LEGAL_THREAT_KEYWORDS.iter().any(|k| msg.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_urgency_escalates() {
        let d = EscalationPolicy::new().check(Intent::Billing, Urgency::High, "Please help urgently");
        assert!(d.escalate);
        assert_eq!(d.note, "High urgency billing issue detected.");
    }

    #[test]
    fn test_high_urgency_note_uses_intent_label() {
        let d = EscalationPolicy::new().check(Intent::TechnicalIssue, Urgency::High, "down now");
        assert_eq!(d.note, "High urgency technical_issue issue detected.");
    }

    #[test]
    fn test_legal_threat_low_urgency() {
        let d = EscalationPolicy::new().check(Intent::GeneralInquiry, Urgency::Low, "I will SUE you");
        assert_eq!(
            d,
            EscalationDecision {
                escalate: true,
                note: LEGAL_THREAT_NOTE.to_string()
            }
        );
    }

    #[test]
    fn test_legal_note_wins_over_urgency() {
        let d = EscalationPolicy::new().check(
            Intent::Billing,
            Urgency::High,
            "My lawyer will call you immediately",
        );
        assert!(d.escalate);
        assert_eq!(d.note, LEGAL_THREAT_NOTE);
    }

    #[test]
    fn test_legal_threat_regardless_of_urgency() {
        let policy = EscalationPolicy::new();
        for urgency in [Urgency::Low, Urgency::Medium, Urgency::High] {
            let d = policy.check(Intent::Billing, urgency, "talk to my lawyer");
            assert!(d.escalate);
            assert_eq!(d.note, LEGAL_THREAT_NOTE);
        }
    }

    #[test]
    fn test_no_escalation() {
        let policy = EscalationPolicy::new();
        for urgency in [Urgency::Low, Urgency::Medium] {
            let d = policy.check(Intent::Billing, urgency, "my invoice looks odd");
            assert_eq!(d, EscalationDecision::none());
            assert_eq!(d.note, NO_ESCALATION_NOTE);
        }
    }

    #[test]
    fn test_issue_over_triggers_legal_rule() {
        let d = EscalationPolicy::new().check(Intent::GeneralInquiry, Urgency::Low, "I have an issue");
        assert!(d.escalate);
        assert_eq!(d.note, LEGAL_THREAT_NOTE);
    }
}
