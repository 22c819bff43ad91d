//! API 路由模块

mod config;
mod health;
mod ui;

pub use config::config_routes;
pub use health::health_routes;
pub use ui::{ui_routes, UI_ENTRY};

use axum::Router;

use crate::state::AppState;
use std::sync::Arc;

/// 创建所有路由
pub fn create_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(config_routes())
        .merge(ui_routes())
        .with_state(state)
}
