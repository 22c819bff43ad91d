//! 问卷区域渲染

use super::node::{Element, Tag};
use crate::models::answer_field;
use crate::services::{Control, Questionnaire};

/// 问卷区域元素 ID
pub const QUESTIONNAIRE_ID: &str = "questionnaire";

/// 下拉框元素 ID，加前缀避免与页面固定元素（如 `region`）冲突
fn control_dom_id(question_id: &str) -> String {
    format!("question-{}", question_id)
}

/// 渲染问卷：每个控件一个带标签的下拉框
pub fn render_questionnaire(questionnaire: &Questionnaire) -> Element {
    Element::new(Tag::Section)
        .id(QUESTIONNAIRE_ID)
        .children(questionnaire.controls.iter().map(render_control))
}

fn render_control(control: &Control) -> Element {
    let dom_id = control_dom_id(&control.id);
    let options = control.options.iter().enumerate().map(|(idx, option)| {
        Element::new(Tag::Option)
            .attr("value", option.as_str())
            .flag_if(control.selected == Some(idx), "selected")
            .text(option.as_str())
    });

    Element::new(Tag::Div)
        .class("question")
        .child(
            Element::new(Tag::Label)
                .attr("for", dom_id.as_str())
                .text(control.label.as_str()),
        )
        .child(
            Element::new(Tag::Select)
                .id(dom_id.as_str())
                .attr("name", answer_field(&control.id))
                .children(options),
        )
}
