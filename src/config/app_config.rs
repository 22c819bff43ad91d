//! 应用配置管理
//!
//! 从可执行文件同级目录的 config.json 加载配置，再用环境变量覆盖。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// 环境变量：后端地址
const ENV_BACKEND_URL: &str = "DESIGN_CONSOLE_BACKEND_URL";
/// 环境变量：监听地址
const ENV_HOST: &str = "DESIGN_CONSOLE_HOST";
/// 环境变量：监听端口
const ENV_PORT: &str = "DESIGN_CONSOLE_PORT";

/// 获取配置文件路径
fn get_config_path() -> PathBuf {
    // 配置文件位于可执行文件同级目录
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.json")
}

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 系统设计后端基础 URL
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 后端请求超时（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// 后端连接超时（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// 部署时未填写区域使用的默认区域
    #[serde(default = "default_region")]
    pub default_region: String,

    /// 种子字段 ID，这些问题不会渲染为下拉框
    #[serde(default = "default_seed_field_ids")]
    pub seed_field_ids: Vec<String>,

    /// 最多保留的会话数
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// 是否记录后端请求日志
    #[serde(default)]
    pub request_log_enabled: bool,

    /// 请求日志目录（默认为可执行文件同级的 storage 目录）
    #[serde(default)]
    pub request_log_dir: Option<PathBuf>,

    /// 请求日志最多保留的条数
    #[serde(default = "default_request_log_max_entries")]
    pub request_log_max_entries: usize,

    /// 页面标题
    #[serde(default = "default_page_title")]
    pub page_title: String,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8766
}

fn default_request_timeout() -> u64 {
    60
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_region() -> String {
    "nyc3".to_string()
}

fn default_seed_field_ids() -> Vec<String> {
    vec!["app_idea".to_string(), "repo_url".to_string()]
}

fn default_max_sessions() -> usize {
    256
}

fn default_request_log_max_entries() -> usize {
    1000
}

fn default_page_title() -> String {
    "System Design Assistant".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            default_region: default_region(),
            seed_field_ids: default_seed_field_ids(),
            max_sessions: default_max_sessions(),
            request_log_enabled: false,
            request_log_dir: None,
            request_log_max_entries: default_request_log_max_entries(),
            page_title: default_page_title(),
        }
    }
}

impl AppConfig {
    /// 判断问题 ID 是否为种子字段
    pub fn is_seed_field(&self, id: &str) -> bool {
        self.seed_field_ids.iter().any(|seed| seed == id)
    }

    /// 用环境变量覆盖配置
    ///
    /// `lookup` 抽象了环境变量读取，便于测试
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BACKEND_URL).filter(|v| !v.trim().is_empty()) {
            self.backend_url = url.trim().to_string();
        }
        if let Some(host) = lookup(ENV_HOST).filter(|v| !v.trim().is_empty()) {
            self.host = host.trim().to_string();
        }
        if let Some(port) = lookup(ENV_PORT) {
            match port.trim().parse::<u16>() {
                Ok(port) => self.port = port,
                Err(e) => warn!("Ignoring invalid {}={:?}: {}", ENV_PORT, port, e),
            }
        }
    }
}

/// 从文件加载配置
fn load_config_from_file() -> Option<AppConfig> {
    let path = get_config_path();
    if path.exists() {
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    } else {
        None
    }
}

/// 加载配置：文件 + 环境变量
///
/// 启动时调用一次，结果交给控制器持有
pub fn load_config() -> AppConfig {
    let mut config = load_config_from_file().unwrap_or_default();
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config
}
