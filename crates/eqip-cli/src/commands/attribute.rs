//! Attribute command implementation.

use super::read_request;
use crate::cli::AttributeArgs;
use crate::error::Result;
use crate::output::Formatter;
use eqip_domain::Attribution;
use eqip_pipeline::{AttributionRequest, Pipeline};

/// Execute the attribute command.
pub fn execute_attribute(args: AttributeArgs, pipeline: &Pipeline, formatter: &Formatter) -> Result<()> {
    let attribution = attribute(&args, pipeline)?;
    println!("{}", formatter.format_attribution(&attribution)?);
    Ok(())
}

/// Read the request named by `args` and score it.
pub fn attribute(args: &AttributeArgs, pipeline: &Pipeline) -> Result<Attribution> {
    let mut request: AttributionRequest = read_request(&args.input)?;
    if let Some(mode) = args.mode {
        request.mode = mode.into();
    }
    Ok(pipeline.compute_attribution(&request)?)
}
