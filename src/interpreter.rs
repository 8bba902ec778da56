use crate::{
    config::InterpreterConfig,
    eval::{Evaluator, ExecutionContext},
    resolver::{JumpTable, ParseResult},
    tokenizer::{tokenize, Program},
    CowResult,
};

/// A tokenized program together with its resolved jump table.
///
/// Immutable once built, so it can be run any number of times, from any
/// number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledProgram {
    program: Program,
    jumps: JumpTable,
}

impl CompiledProgram {
    pub fn compile(source: &str) -> ParseResult<Self> {
        let program = tokenize(source);
        let jumps = JumpTable::build(&program)?;
        Ok(Self { program, jumps })
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn jumps(&self) -> &JumpTable {
        &self.jumps
    }
}

/// Source-to-output pipeline: tokenizer, resolver, evaluator.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    evaluator: Evaluator,
}

impl Interpreter {
    pub fn new(config: InterpreterConfig) -> CowResult<Self> {
        config.validate()?;
        Ok(Self {
            evaluator: Evaluator::new(config),
        })
    }

    pub fn config(&self) -> &InterpreterConfig {
        self.evaluator.config()
    }

    pub fn compile(&self, source: &str) -> CowResult<CompiledProgram> {
        Ok(CompiledProgram::compile(source)?)
    }

    /// Runs `compiled` and returns the final machine state.
    pub fn execute(&self, compiled: &CompiledProgram, input: &str) -> CowResult<ExecutionContext> {
        let ctx = self
            .evaluator
            .execute(&compiled.program, &compiled.jumps, input)?;
        Ok(ctx)
    }

    pub fn run_compiled(&self, compiled: &CompiledProgram, input: &str) -> CowResult<String> {
        Ok(self.execute(compiled, input)?.into_output())
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&self, source: &str, input: &str) -> CowResult<String> {
        let compiled = self.compile(source)?;
        self.run_compiled(&compiled, input)
    }
}
