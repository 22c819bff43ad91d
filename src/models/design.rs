//! 系统设计后端数据模型
//!
//! 与后端 `/api/system-design/*` 接口的 JSON 结构保持一致。
//! 后端不同版本返回的字段不完全相同，所有字段均为可选并接受旧字段名。
//! 旧字段名先读入 `Raw*` 结构，再按优先级合并，新旧字段同时出现时不会报重复字段。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 问题定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 问题 ID（下拉框以 `answer.<id>` 提交）
    pub id: String,
    /// 问题文本
    pub label: String,
    /// 选项列表（有序）
    #[serde(default)]
    pub options: Vec<String>,
}

#[cfg(test)]
impl Question {
    pub fn new(id: impl Into<String>, label: impl Into<String>, options: &[&str]) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// 问题列表响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionsResponse {
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// 问题请求（带种子上下文）
#[derive(Debug, Clone, Serialize)]
pub struct QuestionsRequest {
    pub app_idea: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
}

/// 答案集合：问题 ID -> 选中的选项
pub type AnswerSet = BTreeMap<String, String>;

/// 生成设计请求
#[derive(Debug, Clone, Serialize)]
pub struct OptionsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_idea: Option<String>,
    pub answers: AnswerSet,
}

/// 取第一个非空的候选值
fn first_present(candidates: [Option<String>; 3]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

/// 仓库描述
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRepoDescriptor")]
pub struct RepoDescriptor {
    pub owner: Option<String>,
    pub name: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Deserialize)]
struct RawRepoDescriptor {
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    repo: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
}

impl From<RawRepoDescriptor> for RepoDescriptor {
    fn from(raw: RawRepoDescriptor) -> Self {
        Self {
            owner: raw.owner,
            name: first_present([raw.name, raw.repo, None]),
            full_name: raw.full_name,
        }
    }
}

impl RepoDescriptor {
    /// 仓库全名 `owner/name`
    pub fn full_name(&self) -> Option<String> {
        if let Some(full) = self.full_name.as_deref().map(str::trim) {
            if !full.is_empty() {
                return Some(full.to_string());
            }
        }
        match (self.owner.as_deref(), self.name.as_deref()) {
            (Some(owner), Some(name)) if !owner.is_empty() && !name.is_empty() => {
                Some(format!("{}/{}", owner, name))
            }
            _ => None,
        }
    }
}

/// 单个设计方案
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDesign")]
pub struct Design {
    /// 方案级别/标题（旧版字段名 `name`、`title`）
    pub level: Option<String>,
    /// 目标（旧版字段名 `best_for`）
    pub goal: Option<String>,
    pub best_for: Option<String>,
    pub components: Vec<String>,
    pub why_this_level: Option<String>,
    /// 文本架构图，原样显示
    pub diagram: Option<String>,
    pub user_actions: Vec<String>,
    pub traffic_flow: Vec<String>,
    pub tradeoffs: Vec<String>,
    pub sizing_notes: Vec<String>,
    pub notes: Vec<String>,
}

#[derive(Deserialize)]
struct RawDesign {
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    goal: Option<String>,
    #[serde(default)]
    best_for: Option<String>,
    #[serde(default)]
    components: Vec<String>,
    #[serde(default)]
    why_this_level: Option<String>,
    #[serde(default)]
    diagram: Option<String>,
    #[serde(default)]
    user_actions: Vec<String>,
    #[serde(default)]
    traffic_flow: Vec<String>,
    #[serde(default)]
    tradeoffs: Vec<String>,
    #[serde(default)]
    sizing_notes: Vec<String>,
    #[serde(default)]
    notes: Vec<String>,
}

impl From<RawDesign> for Design {
    fn from(raw: RawDesign) -> Self {
        Self {
            level: first_present([raw.level, raw.name, raw.title]),
            goal: raw.goal,
            best_for: raw.best_for,
            components: raw.components,
            why_this_level: raw.why_this_level,
            diagram: raw.diagram,
            user_actions: raw.user_actions,
            traffic_flow: raw.traffic_flow,
            tradeoffs: raw.tradeoffs,
            sizing_notes: raw.sizing_notes,
            notes: raw.notes,
        }
    }
}

/// 设计推荐结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRecommendation")]
pub struct Recommendation {
    pub app_idea: Option<String>,
    pub repo: Option<RepoDescriptor>,
    /// 目标环境（旧版字段名 `environment`）
    pub target_environment: Option<String>,
    pub domain: Option<String>,
    pub clarifying_summary: Vec<String>,
    /// 设计方案列表（旧版字段名 `options`）
    pub designs: Vec<Design>,
}

#[derive(Deserialize)]
struct RawRecommendation {
    #[serde(default)]
    app_idea: Option<String>,
    #[serde(default)]
    repo: Option<RepoDescriptor>,
    #[serde(default)]
    target_environment: Option<String>,
    #[serde(default)]
    environment: Option<String>,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    clarifying_summary: Vec<String>,
    #[serde(default)]
    designs: Vec<Design>,
    #[serde(default)]
    options: Vec<Design>,
}

impl From<RawRecommendation> for Recommendation {
    fn from(raw: RawRecommendation) -> Self {
        // 新字段非空时优先
        let designs = if raw.designs.is_empty() {
            raw.options
        } else {
            raw.designs
        };
        Self {
            app_idea: raw.app_idea,
            repo: raw.repo,
            target_environment: first_present([raw.target_environment, raw.environment, None]),
            domain: raw.domain,
            clarifying_summary: raw.clarifying_summary,
            designs,
        }
    }
}

/// 部署请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployRequest {
    pub repo_full_name: String,
    pub region: String,
    pub do_token: String,
}

/// 部署结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentResult {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub commands: Vec<String>,
}

/// 后端错误响应体
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
