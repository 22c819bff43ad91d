//! 问卷加载服务
//!
//! 从后端获取问题定义，过滤掉种子字段，生成下拉框控件状态。

use std::collections::HashMap;
use tracing::{debug, info};

use crate::client::{ClientError, DesignBackend};
use crate::config::AppConfig;
use crate::models::{Question, QuestionsRequest};

/// 种子输入（想法文本与仓库地址）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Seed {
    pub app_idea: String,
    pub repo_url: String,
}

impl Seed {
    pub fn new(app_idea: impl Into<String>, repo_url: impl Into<String>) -> Self {
        Self {
            app_idea: app_idea.into().trim().to_string(),
            repo_url: repo_url.into().trim().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.app_idea.is_empty() && self.repo_url.is_empty()
    }

    /// 转换为后端请求；无种子时返回 None（使用 GET）
    pub fn to_request(&self) -> Option<QuestionsRequest> {
        if self.is_empty() {
            return None;
        }
        Some(QuestionsRequest {
            app_idea: self.app_idea.clone(),
            repo_url: (!self.repo_url.is_empty()).then(|| self.repo_url.clone()),
        })
    }
}

/// 已渲染的下拉框控件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub id: String,
    pub label: String,
    pub options: Vec<String>,
    /// 当前选中的选项下标
    pub selected: Option<usize>,
}

impl Control {
    fn from_question(question: Question) -> Self {
        let selected = if question.options.is_empty() { None } else { Some(0) };
        Self {
            id: question.id,
            label: question.label,
            options: question.options,
            selected,
        }
    }

    /// 当前选中值（与浏览器 select.value 一致，无选项时为空串）
    pub fn value(&self) -> &str {
        self.selected
            .and_then(|idx| self.options.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// 选择指定值；值不在选项中时保持原选择并返回 false
    pub fn select(&mut self, value: &str) -> bool {
        match self.options.iter().position(|option| option == value) {
            Some(idx) => {
                self.selected = Some(idx);
                true
            }
            None => false,
        }
    }
}

/// 问卷控件状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Questionnaire {
    pub controls: Vec<Control>,
}

impl Questionnaire {
    /// 由问题列表构建，跳过种子字段
    pub fn from_questions(questions: Vec<Question>, config: &AppConfig) -> Self {
        let controls = questions
            .into_iter()
            .filter(|question| {
                let keep = !config.is_seed_field(&question.id);
                if !keep {
                    debug!("Skipping seed question: {}", question.id);
                }
                keep
            })
            .map(Control::from_question)
            .collect();
        Self { controls }
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// 应用表单提交的选择值，只影响已知控件
    pub fn apply_selections(&mut self, selections: &HashMap<String, String>) {
        for control in &mut self.controls {
            if let Some(value) = selections.get(&control.id) {
                if !control.select(value) {
                    debug!(
                        "Ignoring unknown option {:?} for control {}",
                        value, control.id
                    );
                }
            }
        }
    }
}

/// 问卷加载器
pub struct QuestionnaireLoader<'a> {
    backend: &'a dyn DesignBackend,
    config: &'a AppConfig,
}

impl<'a> QuestionnaireLoader<'a> {
    pub fn new(backend: &'a dyn DesignBackend, config: &'a AppConfig) -> Self {
        Self { backend, config }
    }

    /// 请求问题并构建问卷
    pub async fn load(&self, seed: &Seed) -> Result<Questionnaire, ClientError> {
        let request = seed.to_request();
        info!("Loading questionnaire (seeded={})", request.is_some());
        let questions = self.backend.fetch_questions(request.as_ref()).await?;
        let questionnaire = Questionnaire::from_questions(questions, self.config);
        info!("Rendered {} questions", questionnaire.len());
        Ok(questionnaire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<Question> {
        vec![
            Question::new("app_idea", "What app do you want to design?", &[]),
            Question::new("scale", "Expected scale?", &["small", "large"]),
            Question::new("repo_url", "Repository?", &[]),
            Question::new("notes", "Anything else?", &[]),
        ]
    }

    #[test]
    fn test_seed_questions_excluded() {
        let questionnaire = Questionnaire::from_questions(questions(), &AppConfig::default());
        let ids: Vec<&str> = questionnaire.controls.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["scale", "notes"]);
    }

    #[test]
    fn test_custom_seed_fields() {
        let config = AppConfig {
            seed_field_ids: vec!["scale".to_string()],
            ..Default::default()
        };
        let questionnaire = Questionnaire::from_questions(questions(), &config);
        assert_eq!(questionnaire.len(), 3);
        assert!(questionnaire.controls.iter().all(|c| c.id != "scale"));
    }

    #[test]
    fn test_default_selection_and_apply() {
        let mut questionnaire = Questionnaire::from_questions(questions(), &AppConfig::default());
        assert_eq!(questionnaire.controls[0].value(), "small");
        assert_eq!(questionnaire.controls[1].value(), "");

        let selections: HashMap<String, String> = [
            ("scale", "large"),
            ("notes", "free text"),
            ("unknown", "x"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        questionnaire.apply_selections(&selections);

        assert_eq!(questionnaire.controls[0].value(), "large");
        // 选项外的值被忽略
        assert_eq!(questionnaire.controls[1].value(), "");

        let mut override_again = HashMap::new();
        override_again.insert("scale".to_string(), "huge".to_string());
        questionnaire.apply_selections(&override_again);
        assert_eq!(questionnaire.controls[0].value(), "large");
    }

    #[test]
    fn test_seed_request() {
        assert!(Seed::default().to_request().is_none());
        assert!(Seed::new("   ", "").to_request().is_none());

        let request = Seed::new(" photo sharing app ", "").to_request().unwrap();
        assert_eq!(request.app_idea, "photo sharing app");
        assert!(request.repo_url.is_none());

        let request = Seed::new("", "https://github.com/acme/shop").to_request().unwrap();
        assert_eq!(request.app_idea, "");
        assert_eq!(request.repo_url.as_deref(), Some("https://github.com/acme/shop"));
    }
}
