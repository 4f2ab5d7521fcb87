use serde::{Deserialize, Serialize};

/// Output node tree produced by composition.
///
/// Attributes are an ordered list, not a map: the serializer writes them in
/// the order composition emitted them, so equal inputs produce byte-equal
/// markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DocNode {
    /// Structural element (document, group, section, table, ...)
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<DocNode>,
    },

    /// Resolved leaf with a dual rendering policy: literal mode emits
    /// `content`, template mode emits a placeholder named `key`
    Value { key: String, content: String },

    /// Plain text node
    Text { content: String },
}

impl DocNode {
    pub fn element(tag: impl Into<String>) -> Self {
        DocNode::Element {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn value(key: impl Into<String>, content: impl Into<String>) -> Self {
        DocNode::Value {
            key: key.into(),
            content: content.into(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        DocNode::Text {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let DocNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.push((name.into(), value.into()));
        }
        self
    }

    pub fn with_child(mut self, child: DocNode) -> Self {
        if let DocNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<DocNode>) -> Self {
        if let DocNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            DocNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            DocNode::Element { attributes, .. } => attributes
                .iter()
                .find(|(attr_name, _)| attr_name == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    pub fn children(&self) -> &[DocNode] {
        match self {
            DocNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Child elements with a given tag, in emission order
    pub fn children_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a DocNode> {
        self.children()
            .iter()
            .filter(move |child| child.tag() == Some(tag))
    }
}
