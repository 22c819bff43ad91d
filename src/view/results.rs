//! 设计结果渲染
//!
//! 纯函数：推荐结果 -> 视图树。架构图作为字面文本放入 `<pre>`，
//! 组件列表等带标签字段使用 `Node::Field`，不拼接任何标记。

use super::node::{Element, Node, Tag};
use crate::models::{Design, DeploymentResult, Recommendation};

/// 结果区域元素 ID
pub const RESULTS_ID: &str = "results";

/// 渲染结果区域（最新设计 + 可选的部署命令）
pub fn render_results(
    recommendation: Option<&Recommendation>,
    deployment: Option<&DeploymentResult>,
) -> Element {
    let mut section = Element::new(Tag::Section).id(RESULTS_ID);
    if let Some(recommendation) = recommendation {
        section = section.children(render_recommendation(recommendation));
    }
    if let Some(deployment) = deployment {
        section = section.child(render_commands(deployment));
    }
    section
}

/// 渲染推荐结果：标题、摘要，然后每个方案一张卡片
pub fn render_recommendation(recommendation: &Recommendation) -> Vec<Node> {
    let mut nodes = vec![Node::from(
        Element::new(Tag::H2)
            .class("subject")
            .text(subject_text(recommendation)),
    )];

    if let Some(target) = non_empty(recommendation.target_environment.as_deref()) {
        nodes.push(
            Element::new(Tag::P)
                .class("target")
                .child(Node::field("Target environment", target))
                .into(),
        );
    }

    if let Some(summary) = summary_text(recommendation) {
        nodes.push(Element::new(Tag::P).class("summary").text(summary).into());
    }

    nodes.extend(
        recommendation
            .designs
            .iter()
            .enumerate()
            .map(|(idx, design)| Node::from(render_design(idx, design))),
    );
    nodes
}

/// 标题：想法文本，否则为仓库全名
fn subject_text(recommendation: &Recommendation) -> String {
    if let Some(idea) = non_empty(recommendation.app_idea.as_deref()) {
        return idea.to_string();
    }
    recommendation
        .repo
        .as_ref()
        .and_then(|repo| repo.full_name())
        .unwrap_or_else(|| "System design recommendations".to_string())
}

/// 摘要：领域 + 澄清摘要，以 ` · ` 连接
fn summary_text(recommendation: &Recommendation) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(domain) = non_empty(recommendation.domain.as_deref()) {
        parts.push(format!("Domain: {}", domain));
    }
    parts.extend(
        recommendation
            .clarifying_summary
            .iter()
            .filter(|item| !item.trim().is_empty())
            .cloned(),
    );
    (!parts.is_empty()).then(|| parts.join(" · "))
}

fn render_design(idx: usize, design: &Design) -> Element {
    let title = non_empty(design.level.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Option {}", idx + 1));

    let mut card = Element::new(Tag::Article)
        .class("option-card")
        .child(Element::new(Tag::H3).text(title));

    if let Some(goal) = non_empty(design.goal.as_deref()) {
        card = card.child(Element::new(Tag::P).child(Node::field("Goal", goal)));
    }
    if let Some(best_for) = non_empty(design.best_for.as_deref()) {
        card = card.child(Element::new(Tag::P).child(Node::field("Best for", best_for)));
    }
    if !design.components.is_empty() {
        card = card.child(
            Element::new(Tag::P).child(Node::field("Components", design.components.join(", "))),
        );
    }
    if let Some(why) = non_empty(design.why_this_level.as_deref()) {
        card = card.child(Element::new(Tag::P).child(Node::field("Why this level", why)));
    }
    if let Some(diagram) = design.diagram.as_deref() {
        card = card
            .child(Element::new(Tag::H4).text("Architecture Diagram"))
            .child(Element::new(Tag::Pre).class("diagram").text(diagram));
    }

    let lists: [(&str, &[String]); 5] = [
        ("Trade-offs", design.tradeoffs.as_slice()),
        ("Sizing Notes", design.sizing_notes.as_slice()),
        ("User Actions", design.user_actions.as_slice()),
        ("Traffic Flow", design.traffic_flow.as_slice()),
        ("Notes", design.notes.as_slice()),
    ];
    for (label, items) in lists {
        if items.is_empty() {
            continue;
        }
        card = card
            .child(Element::new(Tag::H4).text(label))
            .child(
                Element::new(Tag::Ul)
                    .children(items.iter().map(|item| Element::new(Tag::Li).text(item.as_str()))),
            );
    }

    card
}

/// 渲染部署命令块
pub fn render_commands(result: &DeploymentResult) -> Element {
    let mut block = Element::new(Tag::Div)
        .id("deployment")
        .class("commands")
        .child(Element::new(Tag::H3).text("Deployment Commands"));
    if !result.message.is_empty() {
        block = block.child(Element::new(Tag::P).text(result.message.as_str()));
    }
    block.child(Element::new(Tag::Pre).text(result.commands.join("\n")))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepoDescriptor;
    use crate::view::html::render_html;

    fn design(diagram: &str) -> Design {
        Design {
            level: Some("Simple design".into()),
            goal: Some("Fast launch".into()),
            components: vec!["AWS WAF".into(), "Application Load Balancer".into()],
            why_this_level: Some("Best for MVP".into()),
            diagram: Some(diagram.into()),
            user_actions: vec!["User opens app".into()],
            traffic_flow: vec!["Mostly synchronous".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_designs_renders_heading_only() {
        let rec = Recommendation {
            app_idea: Some("photo sharing app".into()),
            clarifying_summary: vec!["Cloud: aws".into(), "Peak RPS: 100-1k".into()],
            ..Default::default()
        };
        let section = render_results(Some(&rec), None);

        assert!(section.find_all(Tag::Article).is_empty());
        assert_eq!(section.find_all(Tag::H2)[0].text_content(), "photo sharing app");
        assert_eq!(
            section.find_all(Tag::P)[0].text_content(),
            "Cloud: aws · Peak RPS: 100-1k"
        );
    }

    #[test]
    fn test_card_contents_in_order() {
        let rec = Recommendation {
            app_idea: Some("food delivery app".into()),
            designs: vec![design("Users -> WAF -> LB -> API Service")],
            ..Default::default()
        };
        let section = render_results(Some(&rec), None);
        let cards = section.find_all(Tag::Article);
        assert_eq!(cards.len(), 1);

        let text = cards[0].text_content();
        let goal = text.find("Goal: Fast launch").unwrap();
        let components = text
            .find("Components: AWS WAF, Application Load Balancer")
            .unwrap();
        let why = text.find("Why this level: Best for MVP").unwrap();
        let diagram = text.find("Architecture Diagram").unwrap();
        let actions = text.find("User Actions").unwrap();
        let flow = text.find("Traffic Flow").unwrap();
        assert!(goal < components && components < why && why < diagram);
        assert!(diagram < actions && actions < flow);
        assert!(!text.contains("Trade-offs"));
    }

    #[test]
    fn test_diagram_is_literal_text() {
        let diagram = "Client -> <LB> & App\n    -> DB";
        let rec = Recommendation {
            designs: vec![design(diagram)],
            ..Default::default()
        };
        let section = render_results(Some(&rec), None);

        let pre = section.find_all(Tag::Pre);
        assert_eq!(pre.len(), 1);
        assert_eq!(pre[0].text_content(), diagram);

        let html = render_html(&section.into());
        assert!(html.contains(
            "<pre class=\"diagram\">Client -&gt; &lt;LB&gt; &amp; App\n    -&gt; DB</pre>"
        ));
        assert!(!html.contains("<LB>"));
    }

    #[test]
    fn test_components_are_not_markup() {
        let mut d = design("A -> B");
        d.components = vec!["<strong>Redis</strong>".into()];
        let rec = Recommendation {
            designs: vec![d],
            ..Default::default()
        };
        let html = render_html(&render_results(Some(&rec), None).into());
        assert!(html.contains("<strong>Components:</strong> &lt;strong&gt;Redis&lt;/strong&gt;"));
    }

    #[test]
    fn test_legacy_fields_and_repo_subject() {
        let rec = Recommendation {
            repo: Some(RepoDescriptor {
                owner: Some("acme".into()),
                name: Some("shop".into()),
                full_name: None,
            }),
            target_environment: Some("DigitalOcean App Platform".into()),
            designs: vec![Design {
                best_for: Some("Spiky traffic".into()),
                tradeoffs: vec!["Cold starts".into()],
                sizing_notes: vec!["Start with 128MB".into()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let section = render_results(Some(&rec), None);

        assert_eq!(section.find_all(Tag::H2)[0].text_content(), "acme/shop");
        let text = section.text_content();
        assert!(text.contains("Target environment: DigitalOcean App Platform"));
        assert!(text.contains("Option 1"));
        assert!(text.contains("Best for: Spiky traffic"));
        assert!(text.contains("Trade-offsCold starts"));
        assert!(text.contains("Sizing NotesStart with 128MB"));
    }

    #[test]
    fn test_commands_appended_after_cards() {
        let rec = Recommendation {
            designs: vec![design("A -> B")],
            ..Default::default()
        };
        let deployment = DeploymentResult {
            message: "Run these commands".into(),
            commands: vec!["doctl apps create --spec app.yaml".into(), "echo <done>".into()],
        };
        let section = render_results(Some(&rec), Some(&deployment));

        let last = section.children.last().unwrap();
        let block = last.find_by_id("deployment").unwrap();
        assert_eq!(
            block.find_all(Tag::Pre)[0].text_content(),
            "doctl apps create --spec app.yaml\necho <done>"
        );
        assert!(render_html(last).contains("echo &lt;done&gt;"));
    }

    #[test]
    fn test_no_recommendation_renders_empty_region() {
        let section = render_results(None, None);
        assert_eq!(section.id.as_deref(), Some(RESULTS_ID));
        assert!(section.children.is_empty());
    }
}
