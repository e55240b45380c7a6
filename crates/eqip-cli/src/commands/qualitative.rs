//! Qualitative command implementation.

use super::read_request;
use crate::cli::InputArgs;
use crate::error::Result;
use crate::output::Formatter;
use eqip_domain::Attribution;
use eqip_pipeline::{Pipeline, QualitativeRequest};

/// Execute the qualitative command.
pub fn execute_qualitative(args: InputArgs, pipeline: &Pipeline, formatter: &Formatter) -> Result<()> {
    let attribution = qualitative(&args, pipeline)?;
    println!("{}", formatter.format_attribution(&attribution)?);
    Ok(())
}

/// Read the request named by `args` and score its descriptions.
pub fn qualitative(args: &InputArgs, pipeline: &Pipeline) -> Result<Attribution> {
    let request: QualitativeRequest = read_request(&args.input)?;
    Ok(pipeline.compute_qualitative_attribution(&request)?)
}
