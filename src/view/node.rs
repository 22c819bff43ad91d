//! 声明式视图树
//!
//! 渲染函数只构建 `Node`，由 `html` 模块负责转换为 HTML 文本。
//! 视图树中不存在"原始 HTML"节点，所有文本都按字面值处理。

/// 元素标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Html,
    Head,
    Title,
    Meta,
    Body,
    Main,
    Section,
    Article,
    Div,
    Form,
    H1,
    H2,
    H3,
    H4,
    P,
    Pre,
    Ul,
    Li,
    Label,
    Select,
    Option,
    Input,
    Textarea,
    Button,
    Strong,
}

impl Tag {
    /// 标签名
    pub fn name(self) -> &'static str {
        match self {
            Tag::Html => "html",
            Tag::Head => "head",
            Tag::Title => "title",
            Tag::Meta => "meta",
            Tag::Body => "body",
            Tag::Main => "main",
            Tag::Section => "section",
            Tag::Article => "article",
            Tag::Div => "div",
            Tag::Form => "form",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::H4 => "h4",
            Tag::P => "p",
            Tag::Pre => "pre",
            Tag::Ul => "ul",
            Tag::Li => "li",
            Tag::Label => "label",
            Tag::Select => "select",
            Tag::Option => "option",
            Tag::Input => "input",
            Tag::Textarea => "textarea",
            Tag::Button => "button",
            Tag::Strong => "strong",
        }
    }

    /// 是否为空元素（无结束标签）
    pub fn is_void(self) -> bool {
        matches!(self, Tag::Input | Tag::Meta)
    }
}

/// 属性值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// 普通文本值
    Text(String),
    /// 布尔属性（如 disabled、selected）
    Flag,
}

/// 元素节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, AttrValue)>,
    pub children: Vec<Node>,
}

/// 视图节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// 字面文本
    Text(String),
    /// 带粗体标签的字段：`label: value`，样式由视图层施加
    Field { label: String, value: String },
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// 条件添加 class
    pub fn class_if(self, condition: bool, class: impl Into<String>) -> Self {
        if condition {
            self.class(class)
        } else {
            self
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), AttrValue::Text(value.into())));
        self
    }

    /// 条件添加布尔属性
    pub fn flag_if(mut self, condition: bool, name: impl Into<String>) -> Self {
        if condition {
            self.attrs.push((name.into(), AttrValue::Flag));
        }
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }
}

impl Node {
    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Field {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// 查询辅助方法，供测试检查渲染结果
#[cfg(test)]
impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// 读取文本属性
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find_map(|(key, value)| match value {
            AttrValue::Text(v) if key == name => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.attrs
            .iter()
            .any(|(key, value)| key == name && *value == AttrValue::Flag)
    }

    /// 深度优先查找指定 ID 的元素（包含自身）
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_by_id(id))
    }

    /// 收集所有指定标签的后代元素（包含自身）
    pub fn find_all(&self, tag: Tag) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_tag(tag, &mut found);
        found
    }

    fn collect_tag<'a>(&'a self, tag: Tag, found: &mut Vec<&'a Element>) {
        if self.tag == tag {
            found.push(self);
        }
        for child in &self.children {
            if let Node::Element(element) = child {
                element.collect_tag(tag, found);
            }
        }
    }

    /// 拼接后的文本内容
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_text(&mut out);
        }
        out
    }
}

#[cfg(test)]
impl Node {
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        match self {
            Node::Element(element) => element.find_by_id(id),
            _ => None,
        }
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Node::Element(element) => {
                for child in &element.children {
                    child.write_text(out);
                }
            }
            Node::Text(text) => out.push_str(text),
            Node::Field { label, value } => {
                out.push_str(label);
                out.push_str(": ");
                out.push_str(value);
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}
