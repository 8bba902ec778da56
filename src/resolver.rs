//! Control-flow resolution: pairs every `MOO` with its `moo`.

use thiserror::Error;

use crate::tokenizer::{Program, Span, Token};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unmatched MOO at token {index} ({span})")]
    UnmatchedOpen { index: usize, span: Span },
    #[error("Unmatched moo at token {index} ({span})")]
    UnmatchedClose { index: usize, span: Span },
}

impl ParseError {
    /// Token index the error points at.
    pub fn index(&self) -> usize {
        match self {
            ParseError::UnmatchedOpen { index, .. } | ParseError::UnmatchedClose { index, .. } => {
                *index
            }
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Bidirectional loop table: `target(open) == close` and `target(close) == open`.
///
/// Built once per program and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpTable {
    targets: Vec<Option<usize>>,
    pairs: usize,
}

impl JumpTable {
    #[tracing::instrument(level = "debug", skip(program), fields(tokens = program.len()))]
    pub fn build(program: &Program) -> ParseResult<Self> {
        let mut targets = vec![None; program.len()];
        let mut pending: Vec<usize> = Vec::new();
        let mut pairs = 0;

        for (index, token) in program.tokens().iter().enumerate() {
            match token {
                Token::LoopOpen => pending.push(index),
                Token::LoopClose => {
                    let Some(open) = pending.pop() else {
                        let error = ParseError::UnmatchedClose {
                            index,
                            span: program.span(index).unwrap_or_default(),
                        };
                        tracing::error!("{}", error);
                        return Err(error);
                    };
                    targets[open] = Some(index);
                    targets[index] = Some(open);
                    pairs += 1;
                }
                _ => {}
            }
        }

        if let Some(index) = pending.pop() {
            let error = ParseError::UnmatchedOpen {
                index,
                span: program.span(index).unwrap_or_default(),
            };
            tracing::error!("{}", error);
            return Err(error);
        }

        tracing::debug!("resolved {} loop pairs", pairs);
        Ok(Self { targets, pairs })
    }

    /// The paired index of the loop token at `index`, if it is one.
    pub fn target(&self, index: usize) -> Option<usize> {
        self.targets.get(index).copied().flatten()
    }

    /// `(open, close)` pairs in order of their opening index.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.targets
            .iter()
            .enumerate()
            .filter_map(|(index, target)| match target {
                Some(close) if *close > index => Some((index, *close)),
                _ => None,
            })
    }

    /// Number of loop pairs.
    pub fn len(&self) -> usize {
        self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }
}
