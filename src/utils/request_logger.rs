//! 后端请求日志记录器
//!
//! 记录所有系统设计后端请求到 JSONL 文件，便于调试和分析。
//! 部署令牌只记录脱敏后的形式。

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::warn;
use uuid::Uuid;

/// 请求日志条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// 请求 ID
    pub request_id: String,
    /// 时间戳
    pub timestamp: DateTime<Utc>,
    /// HTTP 方法
    pub method: String,
    /// 端点 URL
    pub endpoint: String,
    /// 部署令牌（脱敏）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_masked: Option<String>,
    /// 状态
    pub status: String,
    /// 持续时间（毫秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// 响应长度
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_length: Option<usize>,
    /// 错误类型
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// 错误信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// HTTP 状态码
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

/// 请求日志记录器
pub struct RequestLogger {
    log_path: PathBuf,
    max_entries: usize,
    file: Mutex<Option<File>>,
}

impl RequestLogger {
    /// 创建新的日志记录器
    pub fn new(log_dir: Option<PathBuf>) -> Self {
        let log_dir = log_dir.unwrap_or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."))
                .join("storage")
        });

        // 确保目录存在
        if let Err(e) = fs::create_dir_all(&log_dir) {
            warn!("Failed to create request log dir {}: {}", log_dir.display(), e);
        }

        Self {
            log_path: log_dir.join("backend_requests.jsonl"),
            max_entries: 1000,
            file: Mutex::new(None),
        }
    }

    /// 设置最多保留的条目数
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    /// 日志文件路径
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// 生成请求 ID
    pub fn generate_request_id() -> String {
        Uuid::new_v4().simple().to_string()[..8].to_string()
    }

    /// 令牌脱敏
    pub fn mask_token(token: &str) -> String {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() <= 8 {
            "*".repeat(chars.len())
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}...{}", head, tail)
        }
    }

    /// 截断字符串（按字符）
    fn truncate(s: &str, max_len: usize) -> String {
        match s.char_indices().nth(max_len) {
            Some((idx, _)) => format!("{}...", &s[..idx]),
            None => s.to_string(),
        }
    }

    /// 记录请求开始
    pub fn log_request(&self, method: &str, endpoint: &str, token: Option<&str>) -> LogEntry {
        LogEntry {
            request_id: Self::generate_request_id(),
            timestamp: Utc::now(),
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            token_masked: token.map(Self::mask_token),
            status: "pending".to_string(),
            duration_ms: None,
            response_length: None,
            error_type: None,
            error_message: None,
            status_code: None,
        }
    }

    /// 记录成功
    pub fn log_success(
        &self,
        mut entry: LogEntry,
        start_time: Instant,
        status_code: u16,
        response_length: usize,
    ) {
        entry.status = "success".to_string();
        entry.duration_ms = Some(start_time.elapsed().as_millis() as u64);
        entry.response_length = Some(response_length);
        entry.status_code = Some(status_code);
        self.write_entry(&entry);
    }

    /// 记录错误
    pub fn log_error(
        &self,
        mut entry: LogEntry,
        start_time: Instant,
        error_type: &str,
        error_message: &str,
        status_code: Option<u16>,
    ) {
        entry.status = "error".to_string();
        entry.duration_ms = Some(start_time.elapsed().as_millis() as u64);
        entry.error_type = Some(error_type.to_string());
        entry.error_message = Some(Self::truncate(error_message, 500));
        entry.status_code = status_code;
        self.write_entry(&entry);
    }

    /// 写入日志条目
    fn write_entry(&self, entry: &LogEntry) {
        let mut file_guard = self.file.lock();

        // 懒加载文件
        if file_guard.is_none() {
            match OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.log_path)
            {
                Ok(f) => *file_guard = Some(f),
                Err(e) => warn!("Failed to open {}: {}", self.log_path.display(), e),
            }
        }

        if let Some(file) = file_guard.as_mut() {
            if let Ok(json) = serde_json::to_string(entry) {
                let _ = writeln!(file, "{}", json);
                let _ = file.flush();
            }
        }

        self.cleanup_if_needed(&mut file_guard);
    }

    /// 清理旧日志
    fn cleanup_if_needed(&self, file_guard: &mut Option<File>) {
        let Ok(file) = File::open(&self.log_path) else {
            return;
        };
        let lines: Vec<String> = BufReader::new(file).lines().map_while(Result::ok).collect();

        if lines.len() > self.max_entries {
            let keep_lines = &lines[lines.len() - self.max_entries..];
            if let Ok(mut file) = File::create(&self.log_path) {
                for line in keep_lines {
                    let _ = writeln!(file, "{}", line);
                }
            }
            // 文件被重写，下次写入时重新打开
            *file_guard = None;
        }
    }
}
