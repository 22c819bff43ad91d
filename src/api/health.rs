//! 健康检查端点

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use super::ui::UI_ENTRY;
use crate::state::AppState;
use std::sync::Arc;

/// 健康检查处理器，附带页面入口提示
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "try": { "ui": UI_ENTRY }
    }))
}

/// 创建健康检查路由
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/health", get(health_check))
}
