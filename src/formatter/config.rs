use strum_macros::{Display, EnumString};

/// Line structure of rendered values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Layout {
    /// One assignment per line, collections broken over indented lines.
    #[default]
    Pretty,
    /// Everything on a single line.
    Inline,
}

#[derive(Debug, Clone, Copy)]
pub struct FormatterConfig {
    pub indent_spaces: usize,
    pub layout: Layout,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            indent_spaces: 4,
            layout: Layout::Pretty,
        }
    }
}
