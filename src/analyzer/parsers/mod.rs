use tracing::warn;

use super::core::ParseError;
use crate::config::Strictness;

pub mod root;
pub mod value;

pub use root::RootParser;
pub use value::{ArrayParser, DictParser, ScalarParser, StringParser, ValueParser};

/// Lenient mode logs and drops the offending item, strict mode fails with it.
fn tolerate(strictness: Strictness, error: ParseError) -> Result<(), ParseError> {
    match strictness {
        Strictness::Lenient => {
            warn!("skipping invalid item: {}", error);
            Ok(())
        }
        Strictness::Strict => Err(error),
    }
}
