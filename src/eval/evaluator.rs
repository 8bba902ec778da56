use std::time::Instant;

use crate::config::{
    InterpreterConfig, OverflowPolicy, PointerPolicy, RegisterMode, UnderflowPolicy,
};
use crate::resolver::JumpTable;
use crate::tokenizer::{Program, Token};

use super::context::{Cell, ExecutionContext};
use super::{RuntimeError, RuntimeResult};

/// How often the wall-clock deadline is consulted, in steps.
const DEADLINE_CHECK_INTERVAL: u64 = 4096;

const BYTE_MAX: Cell = 255;

/// Runs resolved programs under one [`InterpreterConfig`].
///
/// Holds no per-run state; a single evaluator can serve any number of
/// concurrent executions.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: InterpreterConfig,
}

impl Evaluator {
    pub fn new(config: InterpreterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Top level entry point: executes `program` against `input` and returns
    /// the final machine state.
    #[tracing::instrument(level = "debug", skip_all, fields(tokens = program.len()))]
    pub fn execute(
        &self,
        program: &Program,
        jumps: &JumpTable,
        input: &str,
    ) -> RuntimeResult<ExecutionContext> {
        let mut ctx = ExecutionContext::new(self.config.tape_len, input);
        let tokens = program.tokens();
        let started = Instant::now();
        let mut pc = 0;

        while pc < tokens.len() {
            self.check_budget(&ctx, started)?;
            pc = self.step(tokens[pc], pc, jumps, &mut ctx)?;
            ctx.tick();
        }

        tracing::debug!(
            "execution completed: {} steps, {} chars of output",
            ctx.steps(),
            ctx.output().chars().count()
        );
        Ok(ctx)
    }

    /// Executes one instruction and returns the next program counter.
    fn step(
        &self,
        token: Token,
        pc: usize,
        jumps: &JumpTable,
        ctx: &mut ExecutionContext,
    ) -> RuntimeResult<usize> {
        match token {
            Token::PointerRight => self.move_right(pc, ctx)?,
            Token::PointerLeft => self.move_left(pc, ctx)?,
            Token::Increment => self.increment(pc, ctx)?,
            Token::Decrement => self.decrement(pc, ctx)?,
            Token::Input => ctx.read_input(),
            Token::Output => self.output(ctx),
            Token::LoopOpen => {
                if ctx.current() == 0 {
                    return Ok(Self::jump(pc, jumps)? + 1);
                }
            }
            Token::LoopClose => {
                if ctx.current() != 0 {
                    return Ok(Self::jump(pc, jumps)? + 1);
                }
            }
            Token::Exec => {}
            Token::Reset => ctx.set_current(0),
            Token::Register => self.register(ctx),
            // one opcode, two behaviours: read on a zero cell, write otherwise
            Token::ConditionalIo => {
                if ctx.current() == 0 {
                    ctx.read_input();
                } else {
                    self.output(ctx);
                }
            }
        }
        Ok(pc + 1)
    }

    fn check_budget(&self, ctx: &ExecutionContext, started: Instant) -> RuntimeResult<()> {
        if let Some(limit) = self.config.max_steps {
            if ctx.steps() >= limit {
                return Err(RuntimeError::StepLimitExceeded { limit });
            }
        }
        if let Some(timeout) = self.config.timeout {
            if ctx.steps() % DEADLINE_CHECK_INTERVAL == 0 && started.elapsed() > timeout {
                return Err(RuntimeError::DeadlineExceeded {
                    timeout,
                    steps: ctx.steps(),
                });
            }
        }
        Ok(())
    }

    fn jump(pc: usize, jumps: &JumpTable) -> RuntimeResult<usize> {
        jumps
            .target(pc)
            .ok_or(RuntimeError::UnresolvedJump { pc })
    }

    fn move_right(&self, pc: usize, ctx: &mut ExecutionContext) -> RuntimeResult<()> {
        let next = ctx.pointer() + 1;
        if next < ctx.tape_len() {
            ctx.set_pointer(next);
            return Ok(());
        }
        match self.config.pointer_policy {
            PointerPolicy::Strict => Err(RuntimeError::PointerOverflow {
                pc,
                tape_len: ctx.tape_len(),
            }),
            PointerPolicy::Wrap => {
                ctx.set_pointer(0);
                Ok(())
            }
        }
    }

    fn move_left(&self, pc: usize, ctx: &mut ExecutionContext) -> RuntimeResult<()> {
        if let Some(prev) = ctx.pointer().checked_sub(1) {
            ctx.set_pointer(prev);
            return Ok(());
        }
        match self.config.pointer_policy {
            PointerPolicy::Strict => Err(RuntimeError::PointerUnderflow { pc }),
            PointerPolicy::Wrap => {
                ctx.set_pointer(ctx.tape_len() - 1);
                Ok(())
            }
        }
    }

    fn increment(&self, pc: usize, ctx: &mut ExecutionContext) -> RuntimeResult<()> {
        let value = ctx.current();
        let next = match self.config.overflow_policy {
            OverflowPolicy::Wrap if value >= BYTE_MAX => 0,
            OverflowPolicy::Wrap => value + 1,
            OverflowPolicy::Unbounded => {
                value
                    .checked_add(1)
                    .ok_or(RuntimeError::CellOverflow {
                        pc,
                        pointer: ctx.pointer(),
                    })?
            }
        };
        ctx.set_current(next);
        Ok(())
    }

    fn decrement(&self, pc: usize, ctx: &mut ExecutionContext) -> RuntimeResult<()> {
        let next = match (ctx.current().checked_sub(1), self.config.underflow_policy) {
            (Some(next), _) => next,
            (None, UnderflowPolicy::Wrap) => BYTE_MAX,
            (None, UnderflowPolicy::Strict) => {
                return Err(RuntimeError::CellUnderflow {
                    pc,
                    pointer: ctx.pointer(),
                })
            }
        };
        ctx.set_current(next);
        Ok(())
    }

    fn output(&self, ctx: &mut ExecutionContext) {
        let c = ctx.write_output();
        tracing::trace!(
            "output: {:?} (code: {}, pointer: {})",
            c,
            c as u32,
            ctx.pointer()
        );
    }

    fn register(&self, ctx: &mut ExecutionContext) {
        match self.config.register_mode {
            RegisterMode::Inert => {}
            RegisterMode::Transfer => match ctx.take_register() {
                Some(value) => ctx.set_current(value),
                None => ctx.set_register(ctx.current()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tokenizer::tokenize;

    fn run_with(
        config: InterpreterConfig,
        source: &str,
        input: &str,
    ) -> RuntimeResult<ExecutionContext> {
        let program = tokenize(source);
        let jumps = JumpTable::build(&program).unwrap();
        Evaluator::new(config).execute(&program, &jumps, input)
    }

    fn run(source: &str, input: &str) -> RuntimeResult<ExecutionContext> {
        run_with(InterpreterConfig::default(), source, input)
    }

    #[test]
    fn test_empty_program() {
        let ctx = run("", "ignored").unwrap();
        assert_eq!(ctx.output(), "");
        assert_eq!(ctx.steps(), 0);
        assert_eq!(ctx.cursor(), 0);
    }

    #[test]
    fn test_output_untouched_cell() {
        let ctx = run("OOM", "").unwrap();
        assert_eq!(ctx.output(), "\0");
    }

    #[test]
    fn test_pointer_and_cells() {
        let ctx = run("MoO MoO moO MoO mOo MOo", "").unwrap();
        assert_eq!(&ctx.tape()[..3], &[1, 1, 0]);
        assert_eq!(ctx.pointer(), 0);
        assert_eq!(ctx.steps(), 6);
    }

    #[test]
    fn test_loop_moves_value() {
        // cell0 = 3; while cell0 { cell0--; cell1++ }
        let ctx = run("MoO MoO MoO MOO MOo moO MoO mOo moo", "").unwrap();
        assert_eq!(&ctx.tape()[..2], &[0, 3]);
    }

    #[test]
    fn test_loop_skipped_on_zero() {
        let ctx = run("MOO OOM moo MoO", "").unwrap();
        assert_eq!(ctx.output(), "");
        assert_eq!(ctx.current(), 1);
        // MOO jumps to moo, then continues after it
        assert_eq!(ctx.steps(), 2);
    }

    #[test]
    fn test_reset_and_exec() {
        let ctx = run("MoO MoO mOO OOO", "").unwrap();
        assert_eq!(ctx.current(), 0);
    }

    #[test]
    fn test_conditional_io_reads_on_zero() {
        let ctx = run("Moo", "A").unwrap();
        assert_eq!(ctx.current(), 65);
        assert_eq!(ctx.cursor(), 1);
        assert_eq!(ctx.output(), "");
    }

    #[test]
    fn test_conditional_io_writes_on_nonzero() {
        let ctx = run("oom Moo", "Z").unwrap();
        assert_eq!(ctx.output(), "Z");
        assert_eq!(ctx.cursor(), 1);
    }

    #[test]
    fn test_conditional_io_on_exhausted_input() {
        let ctx = run("Moo Moo", "").unwrap();
        assert_eq!(ctx.current(), 0);
        assert_eq!(ctx.output(), "");
    }

    #[test]
    fn test_pointer_underflow_strict() {
        let error = run("MoO mOo", "").unwrap_err();
        assert_eq!(error, RuntimeError::PointerUnderflow { pc: 1 });
    }

    #[test]
    fn test_pointer_overflow_strict() {
        let config = InterpreterConfig {
            tape_len: 2,
            ..InterpreterConfig::default()
        };
        let error = run_with(config, "moO moO", "").unwrap_err();
        assert_eq!(error, RuntimeError::PointerOverflow { pc: 1, tape_len: 2 });
    }

    #[test]
    fn test_pointer_wraps_when_permissive() {
        let config = InterpreterConfig {
            tape_len: 3,
            ..InterpreterConfig::permissive()
        };
        let ctx = run_with(config.clone(), "mOo MoO", "").unwrap();
        assert_eq!(ctx.pointer(), 2);
        assert_eq!(ctx.tape(), &[0, 0, 1]);

        let ctx = run_with(config, "moO moO moO", "").unwrap();
        assert_eq!(ctx.pointer(), 0);
    }

    #[test]
    fn test_cell_underflow_strict() {
        let error = run("moO MOo", "").unwrap_err();
        assert_eq!(error, RuntimeError::CellUnderflow { pc: 1, pointer: 1 });
    }

    #[test]
    fn test_cell_underflow_wraps() {
        let ctx = run_with(InterpreterConfig::permissive(), "MOo", "").unwrap();
        assert_eq!(ctx.current(), 255);
    }

    #[test]
    fn test_cell_overflow_wraps_by_default() {
        let source = "MoO ".repeat(257);
        let ctx = run(&source, "").unwrap();
        assert_eq!(ctx.current(), 1);
    }

    #[test]
    fn test_cell_overflow_unbounded() {
        let config = InterpreterConfig {
            overflow_policy: OverflowPolicy::Unbounded,
            ..InterpreterConfig::default()
        };
        let source = format!("{}OOM", "MoO ".repeat(300));
        let ctx = run_with(config, &source, "").unwrap();
        assert_eq!(ctx.current(), 300);
        assert_eq!(ctx.output(), "\u{12C}");
    }

    #[test]
    fn test_register_inert_by_default() {
        let ctx = run("MoO MoO MMM moO MMM", "").unwrap();
        assert_eq!(&ctx.tape()[..2], &[2, 0]);
        assert_eq!(ctx.register(), None);
    }

    #[test]
    fn test_register_transfer() {
        let config = InterpreterConfig {
            register_mode: RegisterMode::Transfer,
            ..InterpreterConfig::default()
        };
        // copy 2 from cell0, paste into cell1
        let ctx = run_with(config.clone(), "MoO MoO MMM moO MMM", "").unwrap();
        assert_eq!(&ctx.tape()[..2], &[2, 2]);
        assert_eq!(ctx.register(), None);

        let ctx = run_with(config, "MoO MMM", "").unwrap();
        assert_eq!(ctx.register(), Some(1));
    }

    #[test]
    fn test_step_limit() {
        let config = InterpreterConfig {
            max_steps: Some(1_000),
            ..InterpreterConfig::default()
        };
        // MoO MOO moo: loops forever
        let error = run_with(config, "MoO MOO moo", "").unwrap_err();
        assert_eq!(error, RuntimeError::StepLimitExceeded { limit: 1_000 });
    }

    #[test]
    fn test_step_limit_allows_exact_budget() {
        let config = InterpreterConfig {
            max_steps: Some(3),
            ..InterpreterConfig::default()
        };
        let ctx = run_with(config, "MoO MoO OOM", "").unwrap();
        assert_eq!(ctx.steps(), 3);
    }

    #[test]
    fn test_deadline() {
        let config = InterpreterConfig {
            max_steps: None,
            timeout: Some(Duration::from_millis(20)),
            ..InterpreterConfig::default()
        };
        let error = run_with(config, "MoO MOO moo", "").unwrap_err();
        assert!(matches!(error, RuntimeError::DeadlineExceeded { .. }));
    }

    #[test]
    fn test_unresolved_jump() {
        let program = tokenize("MOO moo");
        let error = Evaluator::default()
            .execute(&program, &JumpTable::default(), "")
            .unwrap_err();
        assert_eq!(error, RuntimeError::UnresolvedJump { pc: 0 });
    }
}
