//! Lektor - AI 文学助手服务
//!
//! 装配顺序:
//! - 配置 -> 日志 -> 适配器 -> AppState -> HTTP 服务器

use std::sync::Arc;

use lektor::config::{load_config, print_config};
use lektor::infrastructure::adapters::{GeminiAssistantClient, GeminiClientConfig};
use lektor::infrastructure::http::{AppState, HttpServer, ServerConfig};
use lektor::infrastructure::memory::InMemorySessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},lektor={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Lektor - AI 文学助手服务");
    print_config(&config);

    if config.assistant.api_key.is_empty() {
        tracing::warn!("Assistant API key is not set; backend calls will fail");
    }

    // 创建 Gemini 助手客户端
    let assistant_config = GeminiClientConfig {
        api_key: config.assistant.api_key.clone(),
        base_url: config.assistant.base_url.clone(),
        model: config.assistant.model.clone(),
        timeout_secs: config.assistant.timeout_secs,
    };
    let assistant = Arc::new(GeminiAssistantClient::new(assistant_config)?);

    // 创建内存会话存储
    let sessions = InMemorySessionStore::new().arc();

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_body_bytes(config.upload.max_upload_size);
    let state = AppState::new(sessions, assistant);

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c")
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
