//! 视图树到 HTML 的转换
//!
//! 所有文本和属性值都会被转义。`<pre>` 与 `<textarea>` 内容保持原样，
//! 以换行开头时补一个换行，抵消 HTML 解析器丢弃首个换行的行为。

use super::node::{AttrValue, Element, Node, Tag};

/// 转义 HTML 特殊字符
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// 渲染单个节点
#[cfg(test)]
pub fn render_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// 渲染完整文档
pub fn render_document(root: &Element) -> String {
    let mut out = String::from("<!DOCTYPE html>\n");
    write_element(root, &mut out);
    out.push('\n');
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(element) => write_element(element, out),
        Node::Text(text) => out.push_str(&escape(text)),
        Node::Field { label, value } => {
            let strong = Tag::Strong.name();
            out.push('<');
            out.push_str(strong);
            out.push('>');
            out.push_str(&escape(label));
            out.push_str(":</");
            out.push_str(strong);
            out.push_str("> ");
            out.push_str(&escape(value));
        }
    }
}

fn write_element(element: &Element, out: &mut String) {
    let name = element.tag.name();
    out.push('<');
    out.push_str(name);

    if let Some(id) = &element.id {
        write_attr(out, "id", id);
    }
    if !element.classes.is_empty() {
        write_attr(out, "class", &element.classes.join(" "));
    }
    for (key, value) in &element.attrs {
        match value {
            AttrValue::Text(v) => write_attr(out, key, v),
            AttrValue::Flag => {
                out.push(' ');
                out.push_str(&escape(key));
            }
        }
    }
    out.push('>');

    if element.tag.is_void() {
        return;
    }

    if matches!(element.tag, Tag::Pre | Tag::Textarea) && starts_with_newline(element) {
        out.push('\n');
    }

    for child in &element.children {
        write_node(child, out);
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn write_attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(&escape(key));
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

fn starts_with_newline(element: &Element) -> bool {
    matches!(element.children.first(), Some(Node::Text(text)) if text.starts_with('\n'))
}
