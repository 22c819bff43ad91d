//! 数据模型

mod api;
mod design;

pub use api::*;
pub use design::*;
