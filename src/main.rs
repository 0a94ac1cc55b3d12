//! Bee Desk - 客服请求分诊
//!
//! 入口：初始化日志、加载配置、构造 Coordinator，然后处理单条消息（CLI）或启动 HTTP 服务（--server）。
//!
//! 示例:
//! - `bee-desk "My invoice is wrong, please help urgently"`
//! - `bee-desk --provider mock "I will sue you"`
//! - `cargo run --features server -- --server --port 8000`

use std::path::PathBuf;

use anyhow::{bail, Context};
use bee_desk::config::{load_config, AppConfig, LlmProvider};
use bee_desk::core::Coordinator;
use bee_desk::delivery::{Delivery, JsonDelivery};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "bee-desk", version, about = "Customer support triage pipeline")]
struct Cli {
    /// 客户消息（CLI 模式必填）
    message: Option<String>,

    /// 生成模型，默认随 provider
    #[arg(long)]
    model: Option<String>,

    /// 生成后端凭证
    #[arg(long)]
    api_key: Option<String>,

    /// gemini / openai / deepseek / mock
    #[arg(long)]
    provider: Option<LlmProvider>,

    /// 额外的 TOML 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 启动 HTTP 服务
    #[arg(long)]
    server: bool,

    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,
}

impl Cli {
    /// 命令行参数覆盖配置；仍未配置凭证时，读取一次 provider 对应的环境变量
    fn apply(&self, cfg: &mut AppConfig) {
        if let Some(provider) = self.provider {
            cfg.llm.provider = provider;
        }
        if let Some(model) = &self.model {
            cfg.llm.model = Some(model.clone());
        }
        if let Some(key) = &self.api_key {
            cfg.llm.api_key = Some(key.clone());
        }
        if cfg.llm.api_key.is_none() {
            cfg.llm.api_key = cfg
                .llm
                .provider
                .key_env_var()
                .and_then(|var| std::env::var(var).ok());
        }
        if let Some(host) = &self.host {
            cfg.server.host = host.clone();
        }
        if let Some(port) = self.port {
            cfg.server.port = port;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bee_desk::observability::init();

    let cli = Cli::parse();
    let mut cfg = load_config(cli.config.clone()).context("Failed to load config")?;
    cli.apply(&mut cfg);

    let coordinator = Coordinator::from_config(&cfg).context("Failed to create coordinator")?;

    if cli.server {
        return run_server(coordinator, &cfg).await;
    }

    let Some(message) = cli.message.as_deref() else {
        bail!("message is required for CLI mode");
    };
    let envelope = coordinator.ask(message).await;
    JsonDelivery::stdout()
        .deliver(&envelope)
        .context("Failed to deliver response")?;
    Ok(())
}

#[cfg(feature = "server")]
async fn run_server(coordinator: Coordinator, cfg: &AppConfig) -> anyhow::Result<()> {
    use std::sync::Arc;

    use bee_desk::gateway::{create_router, GatewayState};

    let app = create_router(Arc::new(GatewayState::new(coordinator)));
    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Bee Desk listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(not(feature = "server"))]
async fn run_server(_coordinator: Coordinator, _cfg: &AppConfig) -> anyhow::Result<()> {
    bail!("请使用 --features server 编译以启用 HTTP 服务: cargo run --features server -- --server")
}
