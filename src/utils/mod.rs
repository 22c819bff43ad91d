//! 工具模块

pub mod request_logger;

pub use request_logger::RequestLogger;
