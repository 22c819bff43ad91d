//! 系统设计后端客户端模块
//!
//! 提供 `DesignBackend` trait 及其基于 reqwest 的实现。

#[allow(clippy::module_inception)]
mod client;
mod format;
mod types;

pub use client::DesignClient;
pub use types::{ClientError, DesignBackend};
