//! 配置查看端点（只读）

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::state::AppState;

/// 配置响应
#[derive(Serialize)]
pub struct ConfigResponse {
    pub backend_url: String,
    pub default_region: String,
    pub seed_field_ids: Vec<String>,
    pub max_sessions: usize,
    /// 当前会话数
    pub active_sessions: usize,
    pub request_log_enabled: bool,
}

impl ConfigResponse {
    fn new(config: &AppConfig, active_sessions: usize) -> Self {
        Self {
            backend_url: config.backend_url.clone(),
            default_region: config.default_region.clone(),
            seed_field_ids: config.seed_field_ids.clone(),
            max_sessions: config.max_sessions,
            active_sessions,
            request_log_enabled: config.request_log_enabled,
        }
    }
}

/// 获取当前生效的配置
async fn get_config_handler(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    Json(ConfigResponse::new(
        state.controller.config(),
        state.sessions.len(),
    ))
}

/// 创建配置路由
pub fn config_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/config", get(get_config_handler))
}
