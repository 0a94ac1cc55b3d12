//! 意图识别
//!
//! 对小写化后的消息做子串匹配（非整词匹配）：
//! - 意图按优先级检查，账单类先于技术类，首个命中的类别生效；都不命中则为 general_inquiry
//! - 紧急度与意图独立判定，high 先于 medium；都不命中则为 low
//!
//! 子串匹配会误触发（如 "know" 含 "now"），这是已知行为。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 账单类关键词（优先级 1）
const BILLING_KEYWORDS: &[&str] = &["pay", "bill", "invoice", "charge", "refund", "credit"];

/// 技术问题关键词（优先级 2）
const TECHNICAL_KEYWORDS: &[&str] = &["error", "bug", "fail", "broken", "login", "password"];

const HIGH_URGENCY_KEYWORDS: &[&str] = &["urgent", "immediately", "asap", "now", "critical"];

const MEDIUM_URGENCY_KEYWORDS: &[&str] = &["quickly", "soon", "waiting"];

/// 客户诉求类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    GeneralInquiry,
    Billing,
    TechnicalIssue,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::GeneralInquiry => "general_inquiry",
            Intent::Billing => "billing",
            Intent::TechnicalIssue => "technical_issue",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 紧急度，low < medium < high
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub intent: Intent,
    pub urgency: Urgency,
}

/// 规则意图识别器（不调用 LLM）
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// 任意输入（包括空串）都返回合法的 (intent, urgency)
    pub fn classify(&self, message: &str) -> ClassificationResult {
        let msg = message.to_lowercase();

        let intent = if contains_any(&msg, BILLING_KEYWORDS) {
            Intent::Billing
        } else if contains_any(&msg, TECHNICAL_KEYWORDS) {
            Intent::TechnicalIssue
        } else {
            Intent::GeneralInquiry
        };

        let urgency = if contains_any(&msg, HIGH_URGENCY_KEYWORDS) {
            Urgency::High
        } else if contains_any(&msg, MEDIUM_URGENCY_KEYWORDS) {
            Urgency::Medium
        } else {
            Urgency::Low
        };

        ClassificationResult { intent, urgency }
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> (Intent, Urgency) {
        let r = IntentClassifier::new().classify(text);
        (r.intent, r.urgency)
    }

    #[test]
    fn test_refund_is_billing_low() {
        assert_eq!(classify("I need a refund"), (Intent::Billing, Urgency::Low));
    }

    #[test]
    fn test_invoice_urgently_is_billing_high() {
        assert_eq!(
            classify("My invoice is wrong, please help urgently"),
            (Intent::Billing, Urgency::High)
        );
    }

    #[test]
    fn test_technical_issue() {
        assert_eq!(
            classify("The app shows an ERROR when I open settings"),
            (Intent::TechnicalIssue, Urgency::Low)
        );
    }

    #[test]
    fn test_medium_urgency() {
        assert_eq!(
            classify("I've been waiting for a reply"),
            (Intent::GeneralInquiry, Urgency::Medium)
        );
    }

    #[test]
    fn test_high_beats_medium() {
        assert_eq!(classify("please, soon. it is critical").1, Urgency::High);
    }

    #[test]
    fn test_billing_beats_technical() {
        // 同时命中 "charge" 与 "login"：账单类优先
        assert_eq!(
            classify("I can't login and you charged me twice").0,
            Intent::Billing
        );
        assert_eq!(classify("payment page throws an error").0, Intent::Billing);
    }

    #[test]
    fn test_empty_message_defaults() {
        assert_eq!(classify(""), (Intent::GeneralInquiry, Urgency::Low));
    }

    #[test]
    fn test_substring_over_triggers() {
        // "know" 含 "now"，"failing" 含 "fail"，"repay" 含 "pay"
        assert_eq!(classify("I don't know what happened").1, Urgency::High);
        assert_eq!(classify("it keeps failing").0, Intent::TechnicalIssue);
        assert_eq!(classify("how do I repay the loan").0, Intent::Billing);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let classifier = IntentClassifier::new();
        let text = "Login broken, need help ASAP with my bill";
        let first = classifier.classify(text);
        for _ in 0..10 {
            assert_eq!(classifier.classify(text), first);
        }
        assert_eq!(first.intent, Intent::Billing);
        assert_eq!(first.urgency, Urgency::High);
    }

    #[test]
    fn test_labels_serialize_snake_case() {
        let json = serde_json::to_string(&ClassificationResult {
            intent: Intent::TechnicalIssue,
            urgency: Urgency::Medium,
        })
        .unwrap();
        assert_eq!(json, r#"{"intent":"technical_issue","urgency":"medium"}"#);
    }
}
