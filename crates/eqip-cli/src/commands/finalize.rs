//! Finalize command implementation.

use super::read_request;
use crate::cli::FinalizeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use eqip_domain::OwnershipArrangement;
use eqip_pipeline::{OwnershipRequest, Pipeline};

/// Execute the finalize command.
pub fn execute_finalize(args: FinalizeArgs, pipeline: &Pipeline, formatter: &Formatter) -> Result<()> {
    let arrangement = finalize(&args, pipeline)?;
    println!("{}", formatter.format_arrangement(&arrangement)?);
    Ok(())
}

/// Read the request named by `args`, apply overrides and allocate.
pub fn finalize(args: &FinalizeArgs, pipeline: &Pipeline) -> Result<OwnershipArrangement> {
    let mut request: OwnershipRequest = read_request(&args.input)?;

    if let Some(policy) = &args.policy {
        request.policy_type = policy.clone();
    }

    if let Some(total_shares) = args.total_shares {
        if total_shares == 0 {
            return Err(CliError::InvalidInput(
                "Total shares must be greater than zero".to_string(),
            ));
        }
        request.policy_params.total_shares = Some(total_shares);
    }

    Ok(pipeline.finalize_ownership(&request)?)
}
