//! # KFG: a small configuration language
//!
//! KFG files bind names to typed values:
//!
//! ```text
//! name = 'demo'            // strings use single quotes
//! ratio = 0.75
//! hosts = ['a' 'b']        /* commas are optional */
//! limits = {.cpu: 2 .memory: 512}
//!
//! server::                 // following assignments nest under `server`
//! port = 8080
//! ```
//!
//! ## Processing Pipeline
//!
//! ```text
//! Bytes → Tokenizer → Preprocessor → Parser → Ast
//! ```
//!
//! * [`tokenizer`] classifies bytes into positioned tokens. It never fails.
//! * [`preprocessor`] strips comments and insignificant whitespace. It never fails.
//! * [`analyzer`] parses the remaining tokens into an [`Ast`], stopping at the first
//!   error.
//!
//! [`pipeline`] chains the stages, [`config`] tunes their behavior and [`formatter`]
//! renders the result.
//!
//! ```rust
//! use kfg::{parse_str, Node};
//!
//! let ast = parse_str("server::\nport = 8080").unwrap();
//! assert_eq!(ast.get_path(&["server", "port"]), Some(&Node::Integer(8080)));
//! ```

pub mod analyzer;
pub mod ast;
pub mod config;
pub mod error;
pub mod formatter;
pub mod pipeline;
pub mod preprocessor;
pub mod tokenizer;

// Re-exports
pub use ast::*;
pub use error::*;
pub use pipeline::{lex, lex_with, parse_file, parse_source, parse_str};

#[cfg(test)]
mod tests {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    #[ctor::ctor]
    fn init_tests() {
        // テストの前に一度だけ実行したい処理
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
    }
}
