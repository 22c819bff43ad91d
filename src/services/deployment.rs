//! 部署触发服务

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::info;

use crate::client::{ClientError, DesignBackend};
use crate::config::AppConfig;
use crate::models::{DeployRequest, DeploymentResult, Recommendation, Submission};

/// GitHub 仓库地址
static GITHUB_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?github\.com/([\w.-]+)/([\w.-]+?)(?:\.git)?/?$")
        .expect("valid github url regex")
});

/// `owner/repo` 简写
static SHORT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([\w.-]+)/([\w.-]+)$").expect("valid repo name regex"));

/// 从仓库地址解析 `owner/repo`
pub fn parse_repo_full_name(repo_url: &str) -> Option<String> {
    let repo_url = repo_url.trim();
    GITHUB_URL
        .captures(repo_url)
        .or_else(|| SHORT_NAME.captures(repo_url))
        .map(|caps| format!("{}/{}", &caps[1], &caps[2]))
}

/// 部署输入错误（在发起网络请求前拦截）
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeployInputError {
    #[error("Please enter your DigitalOcean token before deploying.")]
    MissingToken,

    #[error("Please provide a GitHub repository (owner/repo) to deploy.")]
    MissingRepository,
}

/// 部署触发器
pub struct DeploymentTrigger<'a> {
    backend: &'a dyn DesignBackend,
    config: &'a AppConfig,
}

impl<'a> DeploymentTrigger<'a> {
    pub fn new(backend: &'a dyn DesignBackend, config: &'a AppConfig) -> Self {
        Self { backend, config }
    }

    /// 根据已生成的设计和表单构建部署请求
    ///
    /// 仓库优先取设计中的描述，其次解析表单中的仓库地址；区域未填写时使用默认值
    pub fn prepare(
        &self,
        design: &Recommendation,
        submission: &Submission,
    ) -> Result<DeployRequest, DeployInputError> {
        if submission.do_token.is_empty() {
            return Err(DeployInputError::MissingToken);
        }

        let repo_full_name = design
            .repo
            .as_ref()
            .and_then(|repo| repo.full_name())
            .or_else(|| parse_repo_full_name(&submission.repo_url))
            .ok_or(DeployInputError::MissingRepository)?;

        let region = if submission.region.is_empty() {
            self.config.default_region.clone()
        } else {
            submission.region.clone()
        };

        Ok(DeployRequest {
            repo_full_name,
            region,
            do_token: submission.do_token.clone(),
        })
    }

    /// 发送部署请求
    pub async fn trigger(&self, request: &DeployRequest) -> Result<DeploymentResult, ClientError> {
        info!(
            "Triggering deployment: repo={}, region={}",
            request.repo_full_name, request.region
        );
        self.backend.deploy(request).await
    }
}
