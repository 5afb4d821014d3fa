/// What a piece of rendered text represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Key,
    String,
    Number,
    Bool,
    Null,
    Punctuation,
}

/// Decorates rendered text according to its role.
pub trait Theme {
    fn paint(&self, role: Role, text: &str) -> String;
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTheme;

impl Theme for PlainTheme {
    fn paint(&self, _role: Role, text: &str) -> String {
        text.to_string()
    }
}

/// ANSI terminal colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiTheme;

impl AnsiTheme {
    fn code(role: Role) -> Option<u8> {
        match role {
            Role::String => Some(32),
            Role::Number => Some(33),
            Role::Bool => Some(34),
            Role::Null => Some(31),
            Role::Key => Some(36),
            Role::Punctuation => None,
        }
    }
}

impl Theme for AnsiTheme {
    fn paint(&self, role: Role, text: &str) -> String {
        match Self::code(role) {
            Some(code) => format!("\x1b[{}m{}\x1b[0m", code, text),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_theme() {
        assert_eq!(PlainTheme.paint(Role::Number, "42"), "42");
    }

    #[test]
    fn test_ansi_theme() {
        assert_eq!(AnsiTheme.paint(Role::String, "'a'"), "\x1b[32m'a'\x1b[0m");
        assert_eq!(AnsiTheme.paint(Role::Key, "k"), "\x1b[36mk\x1b[0m");
        assert_eq!(AnsiTheme.paint(Role::Punctuation, "="), "=");
    }
}
