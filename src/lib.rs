//! # cowtape: a COW tape-language interpreter
//!
//! Deterministically turns arbitrary text into a short output string by
//! running a program written in COW, a twelve-instruction member of the
//! brainfuck family. The host application feeds task titles through the
//! bundled [`CHECKSUM`](programs::CHECKSUM) program and uses the first output
//! character as the seed of a card colour ([`fingerprint`]).
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source → Tokenizer → Resolver → Evaluator → Output
//! ```
//!
//! * [`tokenizer`]: extracts the twelve instruction spellings, everything else
//!   is commentary. Never fails.
//! * [`resolver`]: pairs loop instructions into a [`JumpTable`](resolver::JumpTable),
//!   failing with a [`ParseError`](resolver::ParseError) on mismatch.
//! * [`eval`]: runs the program on a fresh tape, failing with a
//!   [`RuntimeError`](eval::RuntimeError) on boundary violations or an
//!   exhausted step budget.
//!
//! [`Interpreter`] wires the three together under an [`InterpreterConfig`].
//! Every run owns its own state, so one interpreter can be shared freely
//! between threads.
//!
//! ## Usage Example
//!
//! ```
//! use cowtape::programs::REVERSE;
//!
//! assert_eq!(cowtape::run(REVERSE, "AB").unwrap(), "BA");
//! assert!(cowtape::run("MOO", "").is_err());
//! ```

pub mod config;
pub mod error;
pub mod eval;
pub mod fingerprint;
pub mod interpreter;
pub mod programs;
pub mod resolver;
pub mod tokenizer;

// Re-exports
pub use config::InterpreterConfig;
pub use error::*;
pub use interpreter::{CompiledProgram, Interpreter};

/// Runs `program` on `input` with the default configuration.
pub fn run(program: &str, input: &str) -> CowResult<String> {
    Interpreter::default().run(program, input)
}
