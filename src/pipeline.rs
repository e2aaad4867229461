use std::fmt::Display;

use crate::{
    error::SetupError,
    package_manager::CommandRunner,
    prompt::Prompt,
    steps::{Step, StepContext, StepOutcome},
};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SetupResult {
    applied: u32,
    skipped: u32,
    warnings: u32,
}

impl Display for SetupResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{} applied, {} skipped, {} with warnings", self.applied, self.skipped, self.warnings))
    }
}

/// Runs `steps` in order. The first failure that is critical, either because
/// of the step or because of the error kind, aborts the run.
pub async fn run_steps<P: Prompt, R: CommandRunner>(ctx: &StepContext<'_, P, R>, steps: &[Step]) -> Result<SetupResult, SetupError> {
    let mut result = SetupResult::default();

    for (i, step) in steps.iter().copied().enumerate() {
        ctx.logger.debug(format!("step {}/{}: {step}", i + 1, steps.len()));

        match step.run(ctx).await {
            Ok(StepOutcome::Applied) => result.applied += 1,
            Ok(StepOutcome::Skipped) => result.skipped += 1,
            Ok(StepOutcome::Warning(reason)) => {
                ctx.logger.debug(format!("{step} finished with a warning: {reason}"));
                result.warnings += 1;
            },
            Err(e) if step.is_critical() || e.is_critical() => {
                return Err(SetupError::Step { step: step.name(), source: e })
            },
            Err(e) => {
                ctx.logger.with_tag(step.name()).warn(format!("{e}, continuing"));
                result.warnings += 1;
            },
        }
    }

    Ok(result)
}
