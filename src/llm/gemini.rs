//! Gemini 客户端（Google 提供的 OpenAI 兼容端点）
//!
//! - Base URL: https://generativelanguage.googleapis.com/v1beta/openai/
//! - 默认模型: gemini-2.5-flash

use crate::llm::OpenAiClient;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";
pub const GEMINI_FLASH: &str = "gemini-2.5-flash";

/// 创建 Gemini 客户端；未指定模型时使用 `gemini-2.5-flash`
pub fn create_gemini_client(model: Option<&str>, api_key: &str) -> OpenAiClient {
    OpenAiClient::new(Some(GEMINI_BASE_URL), model.unwrap_or(GEMINI_FLASH), api_key)
}
