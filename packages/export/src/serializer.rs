use docsmith_composer::DocNode;
use serde::{Deserialize, Serialize};

/// Leaf rendering policy. The composed structure (ordering, nesting) is
/// identical between modes; only the leaves differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerializeMode {
    /// Leaves render their resolved value
    Literal,
    /// Leaves render a named `{key}` placeholder, producing a reusable
    /// document template instead of one populated instance
    Template,
}

/// Options for markup output
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Pretty print with newlines and indentation
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct Context {
    options: ExportOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: ExportOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_indent(&mut self) {
        if self.options.pretty {
            for _ in 0..self.depth {
                self.buffer.push_str(&self.options.indent);
            }
        }
    }

    fn end_line(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Render a composed node tree to XML text.
///
/// Nesting is preserved exactly as composed. A childless element is
/// emitted self-closing, so structurally required empty slots stay present
/// and well-formed for schema-stable consumers.
pub fn serialize(tree: &DocNode, mode: SerializeMode, options: &ExportOptions) -> String {
    let mut ctx = Context::new(options.clone());
    ctx.add("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    ctx.end_line();
    serialize_node(tree, mode, &mut ctx);
    ctx.get_output()
}

fn serialize_node(node: &DocNode, mode: SerializeMode, ctx: &mut Context) {
    match node {
        DocNode::Element {
            tag,
            attributes,
            children,
        } => {
            ctx.add_indent();
            ctx.add(&format!("<{}", tag));
            for (name, value) in attributes {
                ctx.add(&format!(" {}=\"{}\"", name, escape_xml(value)));
            }

            if children.is_empty() {
                ctx.add(" />");
                ctx.end_line();
                return;
            }

            ctx.add(">");

            // a lone leaf child renders inline: <field id="x">Acme</field>
            if let [leaf @ (DocNode::Value { .. } | DocNode::Text { .. })] = children.as_slice() {
                ctx.add(&render_leaf(leaf, mode));
                ctx.add(&format!("</{}>", tag));
                ctx.end_line();
                return;
            }

            ctx.end_line();
            ctx.indent();
            for child in children {
                serialize_node(child, mode, ctx);
            }
            ctx.dedent();
            ctx.add_indent();
            ctx.add(&format!("</{}>", tag));
            ctx.end_line();
        }

        leaf => {
            ctx.add_indent();
            ctx.add(&render_leaf(leaf, mode));
            ctx.end_line();
        }
    }
}

fn render_leaf(node: &DocNode, mode: SerializeMode) -> String {
    match (node, mode) {
        (DocNode::Value { content, .. }, SerializeMode::Literal) => escape_xml(content),
        (DocNode::Value { key, .. }, SerializeMode::Template) => {
            format!("{{{}}}", escape_xml(key))
        }
        (DocNode::Text { content }, _) => escape_xml(content),
        (DocNode::Element { .. }, _) => unreachable!("elements are not leaves"),
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
