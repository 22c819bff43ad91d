//! 后端客户端类型定义

use async_trait::async_trait;

use crate::models::{
    DeployRequest, DeploymentResult, OptionsRequest, Question, QuestionsRequest, Recommendation,
};

/// 后端错误信息缺失时的通用提示
pub fn generic_failure_message(status: u16) -> String {
    format!("Request failed with status {}", status)
}

/// 后端客户端错误类型
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP 请求错误（网络/传输层）
    #[error("HTTP 请求失败: {0}")]
    HttpError(#[from] reqwest::Error),

    /// 后端返回非 2xx
    #[error("API 错误 ({status}): {}", .message.as_deref().unwrap_or("<no message>"))]
    ApiError {
        status: u16,
        message: Option<String>,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// JSON 解析错误
    #[error("JSON 解析失败: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ClientError {
    /// 面向用户的提示文本
    ///
    /// 后端报告的错误原样展示；传输和解析错误统一提示无法连接
    pub fn user_message(&self) -> String {
        match self {
            ClientError::ApiError { status, message } => match message.as_deref() {
                Some(msg) if !msg.trim().is_empty() => msg.to_string(),
                _ => generic_failure_message(*status),
            },
            ClientError::HttpError(e) => format!("Could not reach the design service: {}", e),
            ClientError::JsonError(e) => {
                format!("Could not reach the design service: invalid response ({})", e)
            }
            ClientError::ConfigError(msg) => format!("Could not reach the design service: {}", msg),
        }
    }

    /// 是否为后端主动报告的错误
    pub fn is_backend_reported(&self) -> bool {
        matches!(self, ClientError::ApiError { .. })
    }
}

/// 系统设计后端
///
/// 控制器只依赖此 trait，测试中用内存实现替换
#[async_trait]
pub trait DesignBackend: Send + Sync {
    /// 获取问题列表；`seed` 为空时使用 GET
    async fn fetch_questions(
        &self,
        seed: Option<&QuestionsRequest>,
    ) -> Result<Vec<Question>, ClientError>;

    /// 根据想法和答案生成设计方案
    async fn fetch_options(&self, request: &OptionsRequest)
        -> Result<Recommendation, ClientError>;

    /// 触发部署
    async fn deploy(&self, request: &DeployRequest) -> Result<DeploymentResult, ClientError>;
}
