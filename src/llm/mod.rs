//! 生成后端：客户端抽象与实现（OpenAI 兼容 / Gemini / DeepSeek / Mock）

pub mod deepseek;
pub mod gemini;
pub mod mock;
pub mod openai;
pub mod provider;
pub mod traits;

pub use deepseek::{create_deepseek_client, DEEPSEEK_CHAT};
pub use gemini::{create_gemini_client, GEMINI_FLASH};
pub use mock::{MockBehavior, MockLlmClient};
pub use openai::{OpenAiClient, TokenUsage};
pub use provider::create_llm_from_config;
pub use traits::{LlmClient, LlmError};
