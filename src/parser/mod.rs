//! Proto parser: logos lexer plus a recursive-descent parser.
//!
//! The parser covers the declarations the resolver reads (syntax, package,
//! imports, messages, groups, enums, oneofs, extends, services) and skips
//! option values and ranges.

mod errors;
mod lexer;
#[allow(clippy::module_inception)]
mod parser;

pub use errors::ParseError;
pub use lexer::{Token, TokenKind, tokenize};
pub use parser::parse;
