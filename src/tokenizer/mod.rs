//! # Tokenizer Component
//!
//! Lexical analysis of COW source: raw text in, [`Program`](token::Program) out.
//!
//! The dialect has exactly twelve case-sensitive, three-character instruction
//! spellings. Everything else (whitespace, `//` notes, stray letters,
//! non-ASCII text) is commentary and is skipped, so tokenization cannot fail.
//! An empty or comment-only source yields an empty program.
//!
//! ## Component Structure
//!
//! * [`token`]: the [`Token`](token::Token) opcode set, [`Span`](token::Span)
//!   and [`Program`](token::Program)
//! * [`tokenizer`]: the nom-based scanner
//!
//! ## Usage Example
//!
//! ```
//! use cowtape::tokenizer::{tokenize, Token};
//!
//! let program = tokenize("MoO MoO // two increments\nOOM");
//! assert_eq!(
//!     program.tokens(),
//!     &[Token::Increment, Token::Increment, Token::Output]
//! );
//! assert_eq!(program.span(2).unwrap().line, 2);
//! ```

pub mod token;
#[allow(clippy::module_inception)]
pub mod tokenizer;

pub use token::{Program, Span, Token};
pub use tokenizer::{tokenize, Tokenizer};
