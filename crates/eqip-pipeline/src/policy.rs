//! Policy parameter resolution
//!
//! The only place where the loose `policy_type` string and optional
//! parameter bag become a typed [`PolicyParams`]. Every default that gets
//! filled in and every fallback that gets taken is reported as a warning.

use crate::config::AllocationConfig;
use crate::types::PolicyParamsInput;
use eqip_domain::{
    DomainError, EqualParams, FundingParams, PolicyParams, PolicyType, TimeVestedParams,
    WeightedParams,
};

/// Typed parameters plus the warnings raised while resolving them
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPolicy {
    /// Parameters ready for allocation
    pub params: PolicyParams,

    /// Fallbacks and defaults applied
    pub warnings: Vec<String>,
}

/// Resolve a wire policy selection against the configured defaults
///
/// An unknown policy type falls back to weighted with a warning, or fails
/// with [`DomainError::UnsupportedPolicy`] when `strict_policy_types` is set.
pub fn resolve_policy(
    policy_type: &str,
    input: &PolicyParamsInput,
    config: &AllocationConfig,
) -> Result<ResolvedPolicy, DomainError> {
    let mut warnings = Vec::new();

    let policy = match PolicyType::parse(policy_type) {
        Some(policy) => policy,
        None if config.strict_policy_types => {
            return Err(DomainError::UnsupportedPolicy(policy_type.to_string()));
        }
        None => {
            warnings.push(format!(
                "Unknown policy type '{}'; applied weighted policy",
                policy_type
            ));
            PolicyType::Weighted
        }
    };

    let total_shares = input.total_shares.unwrap_or(config.default_total_shares);

    let params = match policy {
        PolicyType::Equal => PolicyParams::Equal(EqualParams { total_shares }),
        PolicyType::Weighted => PolicyParams::Weighted(WeightedParams { total_shares }),
        PolicyType::FundingBased => PolicyParams::FundingBased(FundingParams {
            total_shares,
            funding: input.funding.clone().unwrap_or_default(),
            sweat_equity_weight: input
                .sweat_equity_weight
                .unwrap_or(config.default_sweat_equity_weight),
        }),
        PolicyType::TimeVested => {
            let vesting_period_months = input.vesting_period_months.unwrap_or_else(|| {
                warnings.push(format!(
                    "vesting_period_months not provided; using default of {} months",
                    config.default_vesting_period_months
                ));
                config.default_vesting_period_months
            });
            let cliff_months = input.cliff_months.unwrap_or_else(|| {
                warnings.push(format!(
                    "cliff_months not provided; using default of {} months",
                    config.default_cliff_months
                ));
                config.default_cliff_months
            });
            PolicyParams::TimeVested(TimeVestedParams {
                total_shares,
                vesting_period_months,
                cliff_months,
                time_data: input.time_data.clone().unwrap_or_default(),
                default_months: config.default_months_contributed,
            })
        }
    };

    params.validate()?;
    Ok(ResolvedPolicy { params, warnings })
}
