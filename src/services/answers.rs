//! 答案收集
//!
//! 纯读取当前控件状态，不发起网络请求。

use super::questionnaire::Questionnaire;
use crate::models::{AnswerSet, FIELD_REPO_URL};

/// 答案收集器
pub struct AnswerCollector;

impl AnswerCollector {
    /// 收集所有下拉框的当前值，并合并非空的仓库地址
    pub fn collect(questionnaire: &Questionnaire, repo_url: &str) -> AnswerSet {
        let mut answers: AnswerSet = questionnaire
            .controls
            .iter()
            .map(|control| (control.id.clone(), control.value().to_string()))
            .collect();

        let repo_url = repo_url.trim();
        if !repo_url.is_empty() {
            answers.insert(FIELD_REPO_URL.to_string(), repo_url.to_string());
        }

        answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::Question;
    use std::collections::HashMap;

    fn questionnaire(n: usize) -> Questionnaire {
        let questions = (0..n)
            .map(|i| Question::new(format!("q{}", i), format!("Question {}?", i), &["a", "b"]))
            .collect();
        Questionnaire::from_questions(questions, &AppConfig::default())
    }

    #[test]
    fn test_collect_one_entry_per_control() {
        for n in [0, 1, 7] {
            let answers = AnswerCollector::collect(&questionnaire(n), "");
            assert_eq!(answers.len(), n);
            assert!(answers.values().all(|v| v == "a"));
        }
    }

    #[test]
    fn test_collect_reflects_selection_and_repo() {
        let mut q = questionnaire(2);
        q.apply_selections(&HashMap::from([("q1".to_string(), "b".to_string())]));

        let answers = AnswerCollector::collect(&q, " https://github.com/acme/shop ");
        assert_eq!(answers.len(), 3);
        assert_eq!(answers["q0"], "a");
        assert_eq!(answers["q1"], "b");
        assert_eq!(answers["repo_url"], "https://github.com/acme/shop");
    }

    #[test]
    fn test_collect_empty_questionnaire() {
        let answers = AnswerCollector::collect(&Questionnaire::default(), "   ");
        assert!(answers.is_empty());
    }
}
