//! System Design Console - Rust 服务端
//!
//! 使用 axum 框架构建的服务端渲染页面，向系统设计后端获取问卷、
//! 生成架构方案并触发部署。

use anyhow::Context;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod client;
mod config;
mod error;
mod models;
mod services;
mod session;
mod state;
mod utils;
mod view;

use api::{create_api_routes, UI_ENTRY};
use client::DesignClient;
use services::UiController;
use state::create_shared_state;

/// 在 Windows 上设置控制台代码页为 UTF-8
#[cfg(windows)]
fn setup_console_encoding() {
    unsafe {
        // 设置控制台输出代码页为 UTF-8 (65001)
        extern "system" {
            fn SetConsoleOutputCP(code_page: u32) -> i32;
            fn SetConsoleCP(code_page: u32) -> i32;
        }
        SetConsoleOutputCP(65001);
        SetConsoleCP(65001);
    }
}

#[cfg(not(windows))]
fn setup_console_encoding() {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_console_encoding();

    // 初始化日志
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "design_console=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting System Design Console...");

    let config = config::load_config();
    info!("Design backend: {}", config.backend_url);

    let client = DesignClient::from_config(&config).context("创建后端客户端失败")?;
    let addr = format!("{}:{}", config.host, config.port);
    let state = create_shared_state(UiController::new(Arc::new(client), config));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 构建路由
    let app = Router::new()
        .merge(create_api_routes(Arc::clone(&state)))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("绑定地址失败: {}", addr))?;
    info!("Server listening on: http://{}{}", addr, UI_ENTRY);

    axum::serve(listener, app).await.context("服务运行失败")?;
    Ok(())
}
