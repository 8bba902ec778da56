//! # Execution Engine
//!
//! Runs a tokenized, resolved [`Program`](crate::tokenizer::Program) against
//! a zero-initialised tape.
//!
//! * [`context`]: [`ExecutionContext`], every piece of mutable state of a run
//! * [`evaluator`]: [`Evaluator`], the instruction dispatch loop
//!
//! Any [`RuntimeError`] aborts the run immediately; output produced up to that
//! point is dropped together with the context.

use std::time::Duration;

use thiserror::Error;

pub mod context;
pub mod evaluator;

pub use context::{Cell, ExecutionContext};
pub use evaluator::Evaluator;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Pointer moved past the end of the tape ({tape_len} cells) at token {pc}")]
    PointerOverflow { pc: usize, tape_len: usize },
    #[error("Pointer moved left of cell 0 at token {pc}")]
    PointerUnderflow { pc: usize },
    #[error("Cell {pointer} decremented below zero at token {pc}")]
    CellUnderflow { pc: usize, pointer: usize },
    #[error("Cell {pointer} exceeded the maximum cell value at token {pc}")]
    CellOverflow { pc: usize, pointer: usize },
    #[error("Step limit of {limit} exceeded")]
    StepLimitExceeded { limit: u64 },
    #[error("Deadline of {timeout:?} exceeded after {steps} steps")]
    DeadlineExceeded { timeout: Duration, steps: u64 },
    // only reachable when a jump table is paired with a different program
    #[error("No jump target for loop token {pc}")]
    UnresolvedJump { pc: usize },
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
