//! 页面会话状态
//!
//! 每个访问者一个会话，保存问卷、最新设计和部署结果。
//! 加载与生成操作都先领取票号，返回时只有最新票号的结果会被提交，
//! 以此丢弃重叠请求中过期的响应。

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::warn;

use crate::models::{AnswerSet, DeploymentResult, Recommendation};
use crate::services::{AnswerCollector, Questionnaire, Seed};

/// 页面阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Idle,
    QuestionsLoaded,
    AnswersCollected,
    DesignGenerated,
    Deployed,
}

/// 提示级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// 用户输入缺失
    Input,
    /// 后端或网络错误
    Error,
}

/// 页面提示（相当于浏览器中的 alert）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn input(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Input,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// 已生成的设计及其票号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDesign {
    pub ticket: u64,
    pub recommendation: Recommendation,
}

/// 会话
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    phase: Phase,
    seed: Seed,
    questionnaire: Questionnaire,
    latest: Option<GeneratedDesign>,
    deployment: Option<DeploymentResult>,
    notice: Option<Notice>,
    question_ticket: u64,
    design_ticket: u64,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            phase: Phase::Idle,
            seed: Seed::default(),
            questionnaire: Questionnaire::default(),
            latest: None,
            deployment: None,
            notice: None,
            question_ticket: 0,
            design_ticket: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn latest_design(&self) -> Option<&GeneratedDesign> {
        self.latest.as_ref()
    }

    pub fn deployment(&self) -> Option<&DeploymentResult> {
        self.deployment.as_ref()
    }

    #[cfg(test)]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// 记住用户输入的种子，用于重新渲染输入框
    pub fn remember_seed(&mut self, seed: Seed) {
        self.seed = seed;
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// 取出提示（只显示一次）
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// 问卷是否已加载（生成按钮可见）
    pub fn questions_loaded(&self) -> bool {
        self.phase >= Phase::QuestionsLoaded
    }

    /// 是否允许部署
    pub fn can_deploy(&self) -> bool {
        self.latest.is_some()
    }

    /// 领取问卷加载票号
    pub fn begin_question_load(&mut self) -> u64 {
        self.question_ticket += 1;
        self.question_ticket
    }

    /// 提交问卷；票号过期时丢弃并返回 false
    ///
    /// 重新加载问卷会清除之前的设计和部署结果
    pub fn commit_questions(&mut self, ticket: u64, questionnaire: Questionnaire) -> bool {
        if ticket != self.question_ticket {
            warn!(
                "Discarding stale questionnaire: session={}, ticket={}, latest={}",
                self.id, ticket, self.question_ticket
            );
            return false;
        }
        self.questionnaire = questionnaire;
        self.latest = None;
        self.deployment = None;
        self.phase = Phase::QuestionsLoaded;
        true
    }

    /// 保留表单输入（种子与选择），不改变阶段
    pub fn keep_form_input(&mut self, seed: Seed, selections: &HashMap<String, String>) {
        self.seed = seed;
        self.questionnaire.apply_selections(selections);
    }

    /// 应用提交的选择并收集答案
    pub fn collect_answers(&mut self, selections: &HashMap<String, String>) -> AnswerSet {
        self.questionnaire.apply_selections(selections);
        if self.phase == Phase::QuestionsLoaded {
            self.phase = Phase::AnswersCollected;
        }
        AnswerCollector::collect(&self.questionnaire, &self.seed.repo_url)
    }

    /// 领取生成票号
    pub fn begin_generation(&mut self) -> u64 {
        self.design_ticket += 1;
        self.design_ticket
    }

    /// 提交设计；票号过期时丢弃并返回 false
    pub fn commit_design(&mut self, ticket: u64, recommendation: Recommendation) -> bool {
        if ticket != self.design_ticket {
            warn!(
                "Discarding stale design: session={}, ticket={}, latest={}",
                self.id, ticket, self.design_ticket
            );
            return false;
        }
        self.latest = Some(GeneratedDesign {
            ticket,
            recommendation,
        });
        self.deployment = None;
        self.phase = Phase::DesignGenerated;
        true
    }

    /// 提交部署结果；发起部署时的设计已被替换则丢弃
    pub fn commit_deployment(&mut self, design_ticket: u64, result: DeploymentResult) -> bool {
        match &self.latest {
            Some(latest) if latest.ticket == design_ticket => {
                self.deployment = Some(result);
                self.phase = Phase::Deployed;
                true
            }
            _ => {
                warn!(
                    "Discarding deployment for replaced design: session={}, ticket={}",
                    self.id, design_ticket
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::{Design, Question};

    fn loaded_session() -> Session {
        let mut session = Session::new("s1");
        let ticket = session.begin_question_load();
        let questionnaire = Questionnaire::from_questions(
            vec![Question::new("scale", "Expected scale?", &["small", "large"])],
            &AppConfig::default(),
        );
        assert!(session.commit_questions(ticket, questionnaire));
        session
    }

    fn recommendation(title: &str) -> Recommendation {
        Recommendation {
            designs: vec![Design {
                level: Some(title.to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_phase_progression() {
        let mut session = loaded_session();
        assert_eq!(session.phase(), Phase::QuestionsLoaded);
        assert!(!session.can_deploy());

        let answers = session.collect_answers(&HashMap::from([(
            "scale".to_string(),
            "large".to_string(),
        )]));
        assert_eq!(answers["scale"], "large");
        assert_eq!(session.phase(), Phase::AnswersCollected);

        let ticket = session.begin_generation();
        assert!(session.commit_design(ticket, recommendation("Simple design")));
        assert_eq!(session.phase(), Phase::DesignGenerated);
        assert!(session.can_deploy());

        let result = DeploymentResult {
            message: "ok".into(),
            commands: vec!["doctl apps create".into()],
        };
        assert!(session.commit_deployment(ticket, result));
        assert_eq!(session.phase(), Phase::Deployed);
    }

    #[test]
    fn test_stale_generation_discarded() {
        let mut session = loaded_session();
        let first = session.begin_generation();
        let second = session.begin_generation();

        assert!(session.commit_design(second, recommendation("newer")));
        assert!(!session.commit_design(first, recommendation("older")));

        let latest = session.latest_design().unwrap();
        assert_eq!(latest.ticket, second);
        assert_eq!(latest.recommendation.designs[0].level.as_deref(), Some("newer"));
    }

    #[test]
    fn test_reload_questions_clears_design() {
        let mut session = loaded_session();
        let ticket = session.begin_generation();
        session.commit_design(ticket, recommendation("Simple design"));

        let reload = session.begin_question_load();
        assert!(session.commit_questions(reload, Questionnaire::default()));
        assert_eq!(session.phase(), Phase::QuestionsLoaded);
        assert!(session.latest_design().is_none());
        assert_eq!(session.questionnaire().len(), 0);
    }

    #[test]
    fn test_stale_questionnaire_and_deployment_discarded() {
        let mut session = loaded_session();
        let older = session.begin_question_load();
        let newer = session.begin_question_load();
        assert!(!session.commit_questions(older, Questionnaire::default()));
        assert!(session.commit_questions(newer, Questionnaire::default()));

        let first = session.begin_generation();
        session.commit_design(first, recommendation("a"));
        let second = session.begin_generation();
        session.commit_design(second, recommendation("b"));

        assert!(!session.commit_deployment(first, DeploymentResult::default()));
        assert!(session.deployment().is_none());
        assert_eq!(session.phase(), Phase::DesignGenerated);
    }

    #[test]
    fn test_notice_taken_once() {
        let mut session = Session::new("s2");
        session.set_notice(Notice::input("Please describe your app idea."));
        assert_eq!(session.take_notice().unwrap().kind, NoticeKind::Input);
        assert!(session.take_notice().is_none());
    }
}
