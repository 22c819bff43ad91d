//! 页面路由
//!
//! 入口创建会话并完成首次问卷加载，随后重定向到会话页面。
//! 表单动作执行后直接返回重新渲染的页面。

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Form, Router,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Submission;
use crate::services::Seed;
use crate::state::{AppState, SharedSession};
use crate::view::session_path;

/// 页面入口地址
pub const UI_ENTRY: &str = "/system-design.html";

type FormFields = Form<HashMap<String, String>>;

fn find_session(state: &AppState, id: &str) -> AppResult<SharedSession> {
    if Uuid::parse_str(id).is_err() {
        return Err(AppError::BadRequest(format!("无效的会话 ID: {}", id)));
    }
    state
        .sessions
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("会话不存在: {}", id)))
}

/// 旧入口：302 到页面入口
async fn legacy_redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, UI_ENTRY)])
}

/// 创建会话并执行首次（无种子）问卷加载
async fn open_session(State(state): State<Arc<AppState>>) -> Redirect {
    let session = state.sessions.create();
    state
        .controller
        .load_questions(&session, Seed::default(), false)
        .await;
    let id = session.lock().id.clone();
    Redirect::to(&session_path(&id))
}

/// 渲染会话页面
async fn show_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let session = find_session(&state, &id)?;
    Ok(Html(state.controller.render(&session)))
}

/// 询问澄清问题
async fn ask_questions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(fields): FormFields,
) -> AppResult<Html<String>> {
    let session = find_session(&state, &id)?;
    let submission = Submission::from_fields(fields);
    debug!("Ask questions: session={}, seeded={}", id, submission.has_seed());

    let seed = Seed::new(submission.app_idea, submission.repo_url);
    state.controller.load_questions(&session, seed, true).await;
    Ok(Html(state.controller.render(&session)))
}

/// 生成设计
async fn generate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(fields): FormFields,
) -> AppResult<Html<String>> {
    let session = find_session(&state, &id)?;
    state
        .controller
        .generate(&session, Submission::from_fields(fields))
        .await;
    Ok(Html(state.controller.render(&session)))
}

/// 部署最新设计
async fn deploy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(fields): FormFields,
) -> AppResult<Html<String>> {
    let session = find_session(&state, &id)?;
    state
        .controller
        .deploy(&session, Submission::from_fields(fields))
        .await;
    Ok(Html(state.controller.render(&session)))
}

/// 创建页面路由
pub fn ui_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(open_session))
        .route(UI_ENTRY, get(open_session))
        .route("/system-design", get(legacy_redirect))
        .route("/ui/:id", get(show_page))
        .route("/ui/:id/questions", post(ask_questions))
        .route("/ui/:id/generate", post(generate))
        .route("/ui/:id/deploy", post(deploy))
}
