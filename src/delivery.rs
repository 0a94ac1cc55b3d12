//! 响应投递：前端（CLI / HTTP）消费 ResponseEnvelope 的窄接口

use std::io::Write;
use std::sync::Mutex;

use crate::core::{DeskError, ResponseEnvelope};

pub trait Delivery {
    fn deliver(&self, envelope: &ResponseEnvelope) -> Result<(), DeskError>;
}

/// 以缩进 JSON 写出，每个响应占一个 JSON 文档并以换行结尾
pub struct JsonDelivery<W: Write> {
    writer: Mutex<W>,
}

impl JsonDelivery<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> JsonDelivery<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write> Delivery for JsonDelivery<W> {
    fn deliver(&self, envelope: &ResponseEnvelope) -> Result<(), DeskError> {
        let json = serde_json::to_string_pretty(envelope)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| DeskError::Io(std::io::Error::other("delivery writer poisoned")))?;
        writeln!(writer, "{json}")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::{EscalationDecision, Intent, Urgency};

    #[test]
    fn test_json_delivery_writes_envelope() {
        let delivery = JsonDelivery::new(Vec::new());
        let envelope = ResponseEnvelope {
            intent: Intent::Billing,
            urgency: Urgency::High,
            reply: "On it.".to_string(),
            escalation: EscalationDecision {
                escalate: true,
                note: "High urgency billing issue detected.".to_string(),
            },
        };
        delivery.deliver(&envelope).unwrap();

        let out = String::from_utf8(delivery.into_inner()).unwrap();
        assert!(out.ends_with("}\n"));
        let parsed: ResponseEnvelope = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(parsed, envelope);
    }
}
