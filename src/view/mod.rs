//! 视图模块
//!
//! 渲染函数把会话状态映射为声明式视图树，再由 `html` 统一转换为文本。

mod html;
mod node;
mod page;
mod questionnaire;
mod results;

pub use html::render_document;
pub use page::{render_page, session_path, PageView};
