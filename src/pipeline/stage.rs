//! Pipeline stage abstraction.
//!
//! Each cleaning step is a named stage with a typed input and output. A
//! stage consumes the previous stage's value and produces a new one; nothing
//! is mutated in place, so the table the aggregator sees is a frozen value.

use crate::core::errors::Result;
use log::debug;

pub trait Stage {
    type Input;
    type Output;

    /// Execute this stage with the given input.
    fn execute(&self, input: Self::Input) -> Result<Self::Output>;

    /// Stage name for logging.
    fn name(&self) -> &str;
}

/// Run a single stage with debug logging around it.
pub fn run_stage<S: Stage>(stage: &S, input: S::Input) -> Result<S::Output> {
    debug!("Running stage: {}", stage.name());
    let output = stage.execute(input)?;
    debug!("Stage complete: {}", stage.name());
    Ok(output)
}
