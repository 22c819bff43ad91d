//! 完整页面渲染
//!
//! 所有按钮位于同一个表单中，通过 `formaction` 指向各自的动作，
//! 这样每次提交都能带上想法、仓库地址和当前下拉框选择。

use super::node::{Element, Tag};
use super::questionnaire::render_questionnaire;
use super::results::render_results;
use crate::models::{FIELD_APP_IDEA, FIELD_DO_TOKEN, FIELD_REGION, FIELD_REPO_URL};
use crate::session::{Notice, NoticeKind, Session};

/// 隐藏区域使用的 class
pub const HIDDEN_CLASS: &str = "hidden";

/// 页面渲染所需的数据
pub struct PageView<'a> {
    pub title: &'a str,
    pub session: &'a Session,
    /// 本次响应要显示的提示
    pub notice: Option<&'a Notice>,
    pub default_region: &'a str,
}

/// 会话页面地址
pub fn session_path(session_id: &str) -> String {
    format!("/ui/{}", session_id)
}

/// 渲染完整页面
pub fn render_page(view: &PageView<'_>) -> Element {
    let session = view.session;
    let base = session_path(&session.id);
    let latest = session.latest_design().map(|design| &design.recommendation);

    let mut main = Element::new(Tag::Main).child(Element::new(Tag::H1).text(view.title));
    if let Some(notice) = view.notice {
        main = main.child(render_notice(notice));
    }

    let form = Element::new(Tag::Form)
        .id("designForm")
        .attr("method", "post")
        .attr("action", format!("{}/questions", base))
        .child(render_seed_inputs(session))
        .child(
            Element::new(Tag::Button)
                .id("askQuestions")
                .attr("type", "submit")
                .attr("formaction", format!("{}/questions", base))
                .text("Ask clarifying questions"),
        )
        .child(render_questionnaire(session.questionnaire()))
        .child(
            Element::new(Tag::Div)
                .id("generateWrap")
                .class_if(!session.questions_loaded(), HIDDEN_CLASS)
                .child(
                    Element::new(Tag::Button)
                        .id("generate")
                        .attr("type", "submit")
                        .attr("formaction", format!("{}/generate", base))
                        .text("Generate designs"),
                ),
        )
        .child(render_results(latest, session.deployment()))
        .child(render_deploy_controls(&base, session.can_deploy(), view.default_region));

    main = main.child(form);

    Element::new(Tag::Html)
        .attr("lang", "en")
        .child(
            Element::new(Tag::Head)
                .child(Element::new(Tag::Meta).attr("charset", "utf-8"))
                .child(Element::new(Tag::Title).text(view.title)),
        )
        .child(Element::new(Tag::Body).child(main))
}

fn render_notice(notice: &Notice) -> Element {
    let kind = match notice.kind {
        NoticeKind::Input => "notice-input",
        NoticeKind::Error => "notice-error",
    };
    Element::new(Tag::Div)
        .id("alert")
        .class("notice")
        .class(kind)
        .attr("role", "alert")
        .text(notice.message.as_str())
}

fn render_seed_inputs(session: &Session) -> Element {
    let seed = session.seed();
    Element::new(Tag::Div)
        .class("seed")
        .child(
            Element::new(Tag::Label)
                .attr("for", "appIdea")
                .text("What app do you want to design?"),
        )
        .child(
            Element::new(Tag::Textarea)
                .id("appIdea")
                .attr("name", FIELD_APP_IDEA)
                .attr("rows", "3")
                .text(seed.app_idea.as_str()),
        )
        .child(
            Element::new(Tag::Label)
                .attr("for", "repo_url")
                .text("GitHub repository (optional)"),
        )
        .child(
            Element::new(Tag::Input)
                .id("repo_url")
                .attr("type", "text")
                .attr("name", FIELD_REPO_URL)
                .attr("value", seed.repo_url.as_str()),
        )
}

fn render_deploy_controls(base: &str, can_deploy: bool, default_region: &str) -> Element {
    // 令牌输入框从不回填
    Element::new(Tag::Div)
        .id("deployWrap")
        .class("deploy")
        .child(
            Element::new(Tag::Label)
                .attr("for", "do_token")
                .text("DigitalOcean token"),
        )
        .child(
            Element::new(Tag::Input)
                .id("do_token")
                .attr("type", "password")
                .attr("name", FIELD_DO_TOKEN)
                .attr("autocomplete", "off"),
        )
        .child(Element::new(Tag::Label).attr("for", "region").text("Region"))
        .child(
            Element::new(Tag::Input)
                .id("region")
                .attr("type", "text")
                .attr("name", FIELD_REGION)
                .attr("placeholder", default_region),
        )
        .child(
            Element::new(Tag::Button)
                .id("deploy")
                .attr("type", "submit")
                .attr("formaction", format!("{}/deploy", base))
                .flag_if(!can_deploy, "disabled")
                .text("Deploy"),
        )
}
