//! 服务层模块

mod answers;
mod controller;
mod deployment;
mod questionnaire;

pub use answers::AnswerCollector;
pub use controller::UiController;
pub use questionnaire::{Control, Questionnaire, Seed};
