//! 系统设计后端 HTTP 客户端

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use super::format::{build_endpoint, Endpoint};
use super::types::{ClientError, DesignBackend};
use crate::config::AppConfig;
use crate::models::{
    DeployRequest, DeploymentResult, ErrorBody, OptionsRequest, Question, QuestionsRequest,
    QuestionsResponse, Recommendation,
};
use crate::utils::RequestLogger;

/// 系统设计后端客户端
pub struct DesignClient {
    client: Client,
    base_url: String,
    logger: Option<Arc<RequestLogger>>,
}

impl DesignClient {
    /// 创建新的后端客户端
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(ClientError::ConfigError("Backend URL is required".to_string()));
        }

        // 构建 HTTP 客户端
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .pool_max_idle_per_host(5)
            .build()
            .map_err(ClientError::HttpError)?;

        Ok(Self {
            client,
            base_url,
            logger: None,
        })
    }

    /// 根据应用配置创建客户端
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let mut client = Self::new(
            &config.backend_url,
            Duration::from_secs(config.request_timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
        )?;
        if config.request_log_enabled {
            let logger = RequestLogger::new(config.request_log_dir.clone())
                .with_max_entries(config.request_log_max_entries);
            info!("Backend request log: {}", logger.log_path().display());
            client = client.with_request_logger(Arc::new(logger));
        }
        Ok(client)
    }

    /// 启用请求日志
    pub fn with_request_logger(mut self, logger: Arc<RequestLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// 发送请求并解析 JSON 响应
    async fn send<B, T>(
        &self,
        method: Method,
        endpoint: Endpoint,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = build_endpoint(&self.base_url, endpoint);
        debug!("Backend request: {} {}", method, url);

        let start = Instant::now();
        let entry = self
            .logger
            .as_ref()
            .map(|logger| logger.log_request(method.as_str(), &url, token));

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let result = self.execute::<T>(request).await;

        if let (Some(logger), Some(entry)) = (self.logger.as_ref(), entry) {
            match &result {
                Ok((status, length, _)) => logger.log_success(entry, start, *status, *length),
                Err(e) => {
                    let (error_type, status) = match e {
                        ClientError::ApiError { status, .. } => ("api_error", Some(*status)),
                        ClientError::HttpError(_) => ("http_error", None),
                        ClientError::JsonError(_) => ("json_error", None),
                        ClientError::ConfigError(_) => ("config_error", None),
                    };
                    logger.log_error(entry, start, error_type, &e.to_string(), status);
                }
            }
        }

        result.map(|(_, _, value)| value)
    }

    /// 执行请求，返回 (状态码, 响应长度, 解析结果)
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(u16, usize, T), ClientError> {
        let response = request.send().await.map_err(|e| {
            error!("Backend transport error: {}", e);
            ClientError::HttpError(e)
        })?;

        // 检查状态码
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.error);
            warn!(
                "Backend error: status={}, body={}",
                status.as_u16(),
                text.chars().take(500).collect::<String>()
            );
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let value = serde_json::from_str::<T>(&text)?;
        Ok((status.as_u16(), text.len(), value))
    }
}

#[async_trait]
impl DesignBackend for DesignClient {
    async fn fetch_questions(
        &self,
        seed: Option<&QuestionsRequest>,
    ) -> Result<Vec<Question>, ClientError> {
        let response: QuestionsResponse = match seed {
            Some(seed) => {
                self.send(Method::POST, Endpoint::Questions, Some(seed), None)
                    .await?
            }
            None => {
                self.send::<(), _>(Method::GET, Endpoint::Questions, None, None)
                    .await?
            }
        };
        info!("Fetched {} questions", response.questions.len());
        Ok(response.questions)
    }

    async fn fetch_options(
        &self,
        request: &OptionsRequest,
    ) -> Result<Recommendation, ClientError> {
        let recommendation: Recommendation = self
            .send(Method::POST, Endpoint::Options, Some(request), None)
            .await?;
        info!("Fetched {} designs", recommendation.designs.len());
        Ok(recommendation)
    }

    async fn deploy(&self, request: &DeployRequest) -> Result<DeploymentResult, ClientError> {
        let result: DeploymentResult = self
            .send(
                Method::POST,
                Endpoint::Deploy,
                Some(request),
                Some(&request.do_token),
            )
            .await?;
        info!(
            "Deployment accepted for {}: {} commands",
            request.repo_full_name,
            result.commands.len()
        );
        Ok(result)
    }
}
