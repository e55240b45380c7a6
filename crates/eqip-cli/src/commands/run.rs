//! Run command implementation.

use super::read_request;
use crate::cli::RunArgs;
use crate::error::Result;
use crate::output::Formatter;
use eqip_pipeline::{Pipeline, PipelineOutcome, PipelineRunRequest};

/// Execute the run command.
pub fn execute_run(args: RunArgs, pipeline: &Pipeline, formatter: &Formatter) -> Result<()> {
    let outcome = run(&args, pipeline)?;
    println!("{}", formatter.format_outcome(&outcome)?);
    Ok(())
}

/// Read the request named by `args` and run the whole chain.
pub fn run(args: &RunArgs, pipeline: &Pipeline) -> Result<PipelineOutcome> {
    let mut request: PipelineRunRequest = read_request(&args.input)?;

    if let Some(mode) = args.mode {
        request.mode = mode.into();
    }
    if let Some(policy) = &args.policy {
        request.policy_type = policy.clone();
    }
    if args.qualitative {
        request.qualitative = true;
    }

    Ok(pipeline.run(&request)?)
}
