//! 统一错误处理模块
//!
//! 定义应用级错误类型，并实现 axum 的 IntoResponse trait 以便自动转换为 HTTP 响应。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 应用错误枚举
#[derive(Error, Debug)]
pub enum AppError {
    /// 请求参数错误
    #[error("请求错误: {0}")]
    BadRequest(String),

    /// 资源未找到
    #[error("未找到: {0}")]
    NotFound(String),
}

impl AppError {
    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg,
        };

        let body = Json(json!({
            "success": false,
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// 便捷类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("session".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::BadRequest("id".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = AppError::BadRequest("missing idea".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "missing idea");
    }
}
