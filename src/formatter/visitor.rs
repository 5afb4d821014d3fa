use crate::ast::{Ast, Node};
use crate::formatter::config::{FormatterConfig, Layout};
use crate::formatter::theme::{Role, Theme};

pub struct FormatterVisitor<'t> {
    config: FormatterConfig,
    theme: &'t dyn Theme,
    indent_level: usize,
    output: String,
}

impl<'t> FormatterVisitor<'t> {
    pub fn new(config: FormatterConfig, theme: &'t dyn Theme) -> Self {
        Self {
            config,
            theme,
            indent_level: 0,
            output: String::new(),
        }
    }

    pub fn format_ast(mut self, ast: &Ast) -> String {
        for (i, (name, node)) in ast.iter().enumerate() {
            if i > 0 {
                match self.config.layout {
                    Layout::Pretty => self.newline(),
                    Layout::Inline => self.punct("; "),
                }
            }
            self.paint(Role::Key, name);
            self.punct(" = ");
            self.format_node_inner(node);
        }
        self.output
    }

    pub fn format_node(mut self, node: &Node) -> String {
        self.format_node_inner(node);
        self.output
    }

    fn format_node_inner(&mut self, node: &Node) {
        match node {
            Node::String(value) => self.paint(Role::String, &format!("'{}'", value)),
            Node::Integer(value) => self.paint(Role::Number, &value.to_string()),
            // Debug keeps the fractional part of whole floats
            Node::Float(value) => self.paint(Role::Number, &format!("{:?}", value)),
            Node::Bool(value) => self.paint(Role::Bool, &value.to_string()),
            Node::Null => self.paint(Role::Null, "null"),
            Node::Array(items) => {
                self.format_collection("[", "]", items.iter(), |visitor, item| {
                    visitor.format_node_inner(item)
                });
            }
            Node::Dict(entries) => {
                self.format_collection("{", "}", entries.iter(), |visitor, (key, value)| {
                    visitor.punct(".");
                    visitor.paint(Role::Key, key);
                    visitor.punct(": ");
                    visitor.format_node_inner(value);
                });
            }
        }
    }

    fn format_collection<I, T>(
        &mut self,
        open: &str,
        close: &str,
        items: I,
        mut format_item: impl FnMut(&mut Self, T),
    ) where
        I: ExactSizeIterator<Item = T>,
    {
        self.punct(open);
        if items.len() == 0 {
            self.punct(close);
            return;
        }

        match self.config.layout {
            Layout::Pretty => {
                self.indent();
                for item in items {
                    self.newline();
                    format_item(self, item);
                }
                self.dedent();
                self.newline();
            }
            Layout::Inline => {
                for (i, item) in items.enumerate() {
                    if i > 0 {
                        self.punct(", ");
                    }
                    format_item(self, item);
                }
            }
        }
        self.punct(close);
    }

    fn paint(&mut self, role: Role, text: &str) {
        let painted = self.theme.paint(role, text);
        self.write(&painted);
    }

    fn punct(&mut self, text: &str) {
        self.paint(Role::Punctuation, text);
    }

    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    fn newline(&mut self) {
        self.write("\n");
        let padding = " ".repeat(self.indent_level * self.config.indent_spaces);
        self.write(&padding);
    }
}
