//! Bee Desk - 客服请求分诊流水线
//!
//! 每条客户消息依次经过：写入记忆 → 意图/紧急度识别 → 读取上下文 → 生成回复 → 人工升级判定 → 写入回复。
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: Coordinator 编排、流水线阶段、错误类型
//! - **delivery**: 响应投递接口（CLI 输出 JSON）
//! - **gateway**: HTTP 前端（需 server feature）
//! - **llm**: 生成后端抽象与实现（OpenAI 兼容 / Gemini / DeepSeek / Mock）
//! - **memory**: 有上限的对话记忆
//! - **observability**: 日志初始化
//! - **triage**: 意图识别、升级判定、回复生成

pub mod config;
pub mod core;
pub mod delivery;
#[cfg(feature = "server")]
pub mod gateway;
pub mod llm;
pub mod memory;
pub mod observability;
pub mod triage;

pub use crate::core::{Coordinator, DeskError, ResponseEnvelope};
