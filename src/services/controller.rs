//! 页面控制器
//!
//! 串联问卷加载、答案收集、设计生成和部署。会话锁只在读写状态时短暂持有，
//! 不跨越后端请求的 await。

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::deployment::DeploymentTrigger;
use super::questionnaire::{QuestionnaireLoader, Seed};
use crate::client::{ClientError, DesignBackend};
use crate::config::AppConfig;
use crate::models::{OptionsRequest, Submission};
use crate::session::Notice;
use crate::state::SharedSession;
use crate::view::{render_document, render_page, PageView};

/// 询问问题时既没有想法也没有仓库地址
const MISSING_SEED: &str = "Please describe your app idea or provide a repository URL.";
/// 问卷尚未加载时点击生成
const QUESTIONS_NOT_LOADED: &str = "Load the questionnaire before generating designs.";

/// 页面控制器
pub struct UiController {
    backend: Arc<dyn DesignBackend>,
    config: AppConfig,
}

impl UiController {
    pub fn new(backend: Arc<dyn DesignBackend>, config: AppConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 加载问卷
    ///
    /// `require_seed` 为 true 时（用户点击询问按钮）种子为空直接提示，不发请求
    pub async fn load_questions(&self, session: &SharedSession, seed: Seed, require_seed: bool) {
        let ticket = {
            let mut guard = session.lock();
            guard.clear_notice();
            guard.remember_seed(seed.clone());
            if require_seed && seed.is_empty() {
                guard.set_notice(Notice::input(MISSING_SEED));
                return;
            }
            guard.begin_question_load()
        };

        let result = QuestionnaireLoader::new(self.backend.as_ref(), &self.config)
            .load(&seed)
            .await;

        let mut guard = session.lock();
        match result {
            Ok(questionnaire) => {
                if guard.commit_questions(ticket, questionnaire) {
                    info!("Questionnaire loaded: session={}", guard.id);
                }
            }
            Err(e) => {
                Self::report(&guard.id, "load questions", &e);
                guard.set_notice(Notice::error(e.user_message()));
            }
        }
    }

    /// 收集答案并生成设计
    pub async fn generate(&self, session: &SharedSession, submission: Submission) {
        let (ticket, request) = {
            let mut guard = session.lock();
            guard.clear_notice();
            guard.remember_seed(Seed::new(
                submission.app_idea.as_str(),
                submission.repo_url.as_str(),
            ));
            if !guard.questions_loaded() {
                guard.set_notice(Notice::input(QUESTIONS_NOT_LOADED));
                return;
            }

            let answers = guard.collect_answers(&submission.selections);
            let app_idea = guard.seed().app_idea.clone();
            let request = OptionsRequest {
                app_idea: (!app_idea.is_empty()).then_some(app_idea),
                answers,
            };
            (guard.begin_generation(), request)
        };

        info!(
            "Generating designs: {} answers, ticket={}",
            request.answers.len(),
            ticket
        );
        let result = self.backend.fetch_options(&request).await;

        let mut guard = session.lock();
        match result {
            Ok(recommendation) => {
                let count = recommendation.designs.len();
                if guard.commit_design(ticket, recommendation) {
                    info!("Rendered {} designs: session={}", count, guard.id);
                }
            }
            Err(e) => {
                Self::report(&guard.id, "generate", &e);
                guard.set_notice(Notice::error(e.user_message()));
            }
        }
    }

    /// 触发部署；尚未生成设计时不做任何事
    pub async fn deploy(&self, session: &SharedSession, submission: Submission) {
        let trigger = DeploymentTrigger::new(self.backend.as_ref(), &self.config);

        let (design_ticket, request) = {
            let mut guard = session.lock();
            let Some(latest) = guard.latest_design() else {
                debug!("Deploy ignored, no design yet: session={}", guard.id);
                return;
            };
            let design_ticket = latest.ticket;
            let prepared = trigger.prepare(&latest.recommendation, &submission);

            // 保留用户刚编辑的输入，失败时页面只多出提示
            guard.keep_form_input(
                Seed::new(submission.app_idea.as_str(), submission.repo_url.as_str()),
                &submission.selections,
            );
            guard.clear_notice();
            match prepared {
                Ok(request) => (design_ticket, request),
                Err(e) => {
                    guard.set_notice(Notice::input(e.to_string()));
                    return;
                }
            }
        };

        let result = trigger.trigger(&request).await;

        let mut guard = session.lock();
        match result {
            Ok(deployment) => {
                if guard.commit_deployment(design_ticket, deployment) {
                    info!("Deployment commands rendered: session={}", guard.id);
                }
            }
            Err(e) => {
                Self::report(&guard.id, "deploy", &e);
                guard.set_notice(Notice::error(e.user_message()));
            }
        }
    }

    /// 渲染会话页面，并消费待显示的提示
    pub fn render(&self, session: &SharedSession) -> String {
        let mut guard = session.lock();
        debug!("Rendering session {} (phase={:?})", guard.id, guard.phase());
        let notice = guard.take_notice();
        let root = render_page(&PageView {
            title: &self.config.page_title,
            session: &guard,
            notice: notice.as_ref(),
            default_region: &self.config.default_region,
        });
        render_document(&root)
    }

    fn report(session_id: &str, action: &str, error: &ClientError) {
        if error.is_backend_reported() {
            warn!("{} rejected by backend: session={}, {}", action, session_id, error);
        } else {
            tracing::error!("{} failed: session={}, {}", action, session_id, error);
        }
    }
}
