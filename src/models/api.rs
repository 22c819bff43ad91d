//! 页面表单提交模型

use std::collections::HashMap;

/// 想法输入框字段名
pub const FIELD_APP_IDEA: &str = "app_idea";
/// 仓库地址字段名
pub const FIELD_REPO_URL: &str = "repo_url";
/// 部署令牌字段名
pub const FIELD_DO_TOKEN: &str = "do_token";
/// 部署区域字段名
pub const FIELD_REGION: &str = "region";
/// 下拉框字段名前缀，与固定字段隔离
pub const ANSWER_PREFIX: &str = "answer.";

/// 问题 ID 对应的表单字段名
pub fn answer_field(question_id: &str) -> String {
    format!("{}{}", ANSWER_PREFIX, question_id)
}

/// 页面表单提交
///
/// 所有按钮共用一个表单，带 `answer.` 前缀的键为下拉框的选择值
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub app_idea: String,
    pub repo_url: String,
    pub do_token: String,
    pub region: String,
    /// 控件 ID -> 提交的值
    pub selections: HashMap<String, String>,
}

impl Submission {
    /// 从原始表单字段构建
    pub fn from_fields(mut fields: HashMap<String, String>) -> Self {
        let mut take = |key: &str| fields.remove(key).unwrap_or_default().trim().to_string();
        let app_idea = take(FIELD_APP_IDEA);
        let repo_url = take(FIELD_REPO_URL);
        let do_token = take(FIELD_DO_TOKEN);
        let region = take(FIELD_REGION);

        // 其余无前缀的键忽略
        let selections = fields
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(ANSWER_PREFIX)
                    .map(|id| (id.to_string(), value))
            })
            .collect();

        Self {
            app_idea,
            repo_url,
            do_token,
            region,
            selections,
        }
    }

    /// 是否提供了任何种子输入
    pub fn has_seed(&self) -> bool {
        !self.app_idea.is_empty() || !self.repo_url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_fields_splits_fixed_keys() {
        let submission = Submission::from_fields(fields(&[
            ("app_idea", "  photo sharing app "),
            ("repo_url", ""),
            ("do_token", "secret"),
            ("answer.scale", "large"),
            ("stray", "ignored"),
        ]));
        assert_eq!(submission.app_idea, "photo sharing app");
        assert_eq!(submission.do_token, "secret");
        assert!(submission.region.is_empty());
        assert!(submission.has_seed());
        assert_eq!(submission.selections.len(), 1);
        assert_eq!(submission.selections["scale"], "large");
    }

    #[test]
    fn test_question_named_like_fixed_field() {
        let submission = Submission::from_fields(fields(&[
            (answer_field("region").as_str(), "eu-west"),
            ("region", ""),
            (answer_field("do_token").as_str(), "yes"),
        ]));
        assert!(submission.region.is_empty());
        assert!(submission.do_token.is_empty());
        assert_eq!(submission.selections["region"], "eu-west");
        assert_eq!(submission.selections["do_token"], "yes");
    }

    #[test]
    fn test_empty_submission_has_no_seed() {
        assert!(!Submission::default().has_seed());
    }
}
