//! 配置模块

mod app_config;

pub use app_config::{load_config, AppConfig};
