//! 按配置构造生成后端
//!
//! 每个 Coordinator 在构造时绑定唯一后端；缺少凭证直接返回配置错误，不退回 Mock。

use std::sync::Arc;

use crate::config::{LlmProvider, LlmSection};
use crate::core::DeskError;
use crate::llm::{
    create_deepseek_client, create_gemini_client, LlmClient, MockLlmClient, OpenAiClient,
    GEMINI_FLASH,
};

/// OpenAI 官方端点的默认模型
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

pub fn create_llm_from_config(cfg: &LlmSection) -> Result<Arc<dyn LlmClient>, DeskError> {
    if cfg.provider == LlmProvider::Mock {
        tracing::warn!("Using Mock LLM (offline echo backend)");
        return Ok(Arc::new(MockLlmClient::default()));
    }

    let api_key = cfg
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            DeskError::Config(format!("missing API key for LLM provider '{}'", cfg.provider))
        })?;
    let model = cfg.model.as_deref().filter(|m| !m.trim().is_empty());
    let base_url = cfg.base_url.as_deref();

    let client = match (cfg.provider, base_url) {
        (LlmProvider::Gemini, None) => create_gemini_client(model, api_key),
        (LlmProvider::DeepSeek, None) => create_deepseek_client(model, api_key),
        (LlmProvider::Gemini, Some(url)) => {
            OpenAiClient::new(Some(url), model.unwrap_or(GEMINI_FLASH), api_key)
        }
        (LlmProvider::DeepSeek, Some(url)) => OpenAiClient::new(
            Some(url),
            model.unwrap_or(crate::llm::DEEPSEEK_CHAT),
            api_key,
        ),
        (_, url) => OpenAiClient::new(url, model.unwrap_or(OPENAI_DEFAULT_MODEL), api_key),
    };
    let client = match &cfg.instruction {
        Some(instruction) => client.with_instruction(instruction.clone()),
        None => client,
    };

    tracing::info!("Using {} LLM ({})", cfg.provider, client.model());
    Ok(Arc::new(client))
}
