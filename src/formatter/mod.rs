//! Rendering of parsed documents for humans.
//!
//! Output loosely follows KFG syntax: `name = value` per assignment, dictionaries as
//! `{.key: value}` and strings in single quotes. Colors come from a [`Theme`].

pub mod config;
pub mod theme;
pub mod visitor;

use core::fmt;

pub use config::{FormatterConfig, Layout};
pub use theme::{AnsiTheme, PlainTheme, Role, Theme};
pub use visitor::FormatterVisitor;

use crate::ast::{Ast, Node};

#[derive(Clone, Copy)]
pub struct Formatter<'t> {
    config: FormatterConfig,
    theme: &'t dyn Theme,
}

impl Default for Formatter<'static> {
    fn default() -> Self {
        Self::new(FormatterConfig::default())
    }
}

impl Formatter<'static> {
    pub fn new(config: FormatterConfig) -> Self {
        Self {
            config,
            theme: &PlainTheme,
        }
    }
}

impl<'t> Formatter<'t> {
    pub fn with_theme<'u>(self, theme: &'u dyn Theme) -> Formatter<'u> {
        Formatter {
            config: self.config,
            theme,
        }
    }

    pub fn format(&self, ast: &Ast) -> String {
        FormatterVisitor::new(self.config, self.theme).format_ast(ast)
    }

    pub fn format_node(&self, node: &Node) -> String {
        FormatterVisitor::new(self.config, self.theme).format_node(node)
    }

    pub fn write_ast<W: fmt::Write>(&self, out: &mut W, ast: &Ast) -> fmt::Result {
        out.write_str(&self.format(ast))
    }

    pub fn write_node<W: fmt::Write>(&self, out: &mut W, node: &Node) -> fmt::Result {
        out.write_str(&self.format_node(node))
    }
}
