//! Allocation policies
//!
//! Each policy is a pure function of the attributions and its own
//! parameters. Shares are floor-rounded here; [`crate::reconciliation`]
//! absorbs the rounding drift afterwards.

use crate::attribution::ContributorAttribution;
use crate::ownership::{
    FundingParams, GovernanceRights, OwnershipShare, PolicyParams, PolicyType, TimeVestedParams,
};
use crate::traits::{AllocationPolicy, PolicyOutcome};
use std::collections::BTreeMap;

/// Percentage at or above which a holder has majority control
pub const MAJORITY_THRESHOLD: f64 = 50.0;
/// Percentage at or above which a holder is significant
pub const SIGNIFICANT_THRESHOLD: f64 = 25.0;
/// Percentage at or above which a weighted holder is standard
pub const STANDARD_THRESHOLD: f64 = 10.0;

/// Build the policy implementation for a parameter set
pub fn policy_for(params: &PolicyParams) -> Box<dyn AllocationPolicy> {
    match params {
        PolicyParams::Equal(_) => Box::new(EqualPolicy),
        PolicyParams::Weighted(_) => Box::new(WeightedPolicy),
        PolicyParams::FundingBased(p) => Box::new(FundingBasedPolicy::new(p.clone())),
        PolicyParams::TimeVested(p) => Box::new(TimeVestedPolicy::new(p.clone())),
    }
}

/// `floor(fraction * total)`, never negative
pub fn floor_shares(fraction: f64, total_shares: u64) -> u64 {
    let raw = (fraction * total_shares as f64).floor();
    if raw.is_finite() && raw > 0.0 {
        raw as u64
    } else {
        0
    }
}

/// `shares / total * 100`
pub fn percentage_of(shares: u64, total_shares: u64) -> f64 {
    if total_shares == 0 {
        0.0
    } else {
        shares as f64 / total_shares as f64 * 100.0
    }
}

fn share_row(
    attribution: &ContributorAttribution,
    shares: u64,
    total_shares: u64,
    governance_rights: GovernanceRights,
) -> OwnershipShare {
    OwnershipShare {
        contributor_email: attribution.contributor_email.clone(),
        contributor_name: attribution.contributor_name.clone(),
        shares,
        percentage: percentage_of(shares, total_shares),
        governance_rights,
    }
}

/// Governance tier for the weighted policy
pub fn weighted_rights(percentage: f64) -> GovernanceRights {
    if percentage >= MAJORITY_THRESHOLD {
        GovernanceRights::Majority
    } else if percentage >= SIGNIFICANT_THRESHOLD {
        GovernanceRights::Significant
    } else if percentage >= STANDARD_THRESHOLD {
        GovernanceRights::Standard
    } else {
        GovernanceRights::Minority
    }
}

/// Governance tier for the funding-based policy
pub fn funding_rights(percentage: f64, funding: f64) -> GovernanceRights {
    if percentage >= MAJORITY_THRESHOLD {
        GovernanceRights::Majority
    } else if percentage >= SIGNIFICANT_THRESHOLD {
        GovernanceRights::Significant
    } else if funding > 0.0 {
        GovernanceRights::Investor
    } else {
        GovernanceRights::Standard
    }
}

/// Governance tier for the time-vested policy
pub fn vesting_rights(vested_fraction: f64) -> GovernanceRights {
    if vested_fraction >= 1.0 {
        GovernanceRights::FullyVested
    } else if vested_fraction > 0.5 {
        GovernanceRights::PartiallyVested
    } else if vested_fraction > 0.0 {
        GovernanceRights::CliffVested
    } else {
        GovernanceRights::Unvested
    }
}

/// Fraction vested after `months`
///
/// Zero before the cliff, then linear up to 1.0 at the end of the period.
pub fn vested_fraction(months: f64, cliff_months: f64, vesting_period_months: f64) -> f64 {
    if months < cliff_months {
        0.0
    } else {
        (months / vesting_period_months).min(1.0)
    }
}

/// Even split; the remainder goes one unit each to the first holders
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualPolicy;

impl AllocationPolicy for EqualPolicy {
    fn policy_type(&self) -> PolicyType {
        PolicyType::Equal
    }

    fn allocate(&self, attributions: &[ContributorAttribution], total_shares: u64) -> PolicyOutcome {
        let n = attributions.len() as u64;
        let mut shares = Vec::with_capacity(attributions.len());

        if n > 0 {
            let base = total_shares / n;
            let remainder = total_shares % n;
            for (i, a) in attributions.iter().enumerate() {
                let s = base + u64::from((i as u64) < remainder);
                shares.push(share_row(a, s, total_shares, GovernanceRights::Equal));
            }
        }

        PolicyOutcome {
            shares,
            applied: PolicyType::Equal,
            notices: Vec::new(),
        }
    }
}

/// Shares proportional to attribution weight
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedPolicy;

impl AllocationPolicy for WeightedPolicy {
    fn policy_type(&self) -> PolicyType {
        PolicyType::Weighted
    }

    fn allocate(&self, attributions: &[ContributorAttribution], total_shares: u64) -> PolicyOutcome {
        let shares = attributions
            .iter()
            .map(|a| {
                let s = floor_shares(a.weight, total_shares);
                share_row(a, s, total_shares, weighted_rights(a.weight * 100.0))
            })
            .collect();

        PolicyOutcome {
            shares,
            applied: PolicyType::Weighted,
            notices: Vec::new(),
        }
    }
}

/// Blend of sweat equity (attribution weight) and funding share
///
/// Degrades to [`WeightedPolicy`] when no funding data is supplied.
#[derive(Debug, Clone)]
pub struct FundingBasedPolicy {
    params: FundingParams,
}

impl FundingBasedPolicy {
    /// Create the policy
    pub fn new(params: FundingParams) -> Self {
        Self { params }
    }
}

impl AllocationPolicy for FundingBasedPolicy {
    fn policy_type(&self) -> PolicyType {
        PolicyType::FundingBased
    }

    fn allocate(&self, attributions: &[ContributorAttribution], total_shares: u64) -> PolicyOutcome {
        if self.params.funding.is_empty() {
            let mut outcome = WeightedPolicy.allocate(attributions, total_shares);
            outcome
                .notices
                .push("funding_based policy has no funding data; applied weighted policy".to_string());
            return outcome;
        }

        let mut notices = Vec::new();
        let unknown: Vec<&str> = self
            .params
            .funding
            .keys()
            .filter(|email| !attributions.iter().any(|a| &a.contributor_email == *email))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            notices.push(format!(
                "funding for unknown contributors counted toward total funding: {}",
                unknown.join(", ")
            ));
        }

        let sweat = self.params.sweat_equity_weight;
        let total_funding: f64 = self.params.funding.values().sum();

        let shares = attributions
            .iter()
            .map(|a| {
                let funding = self.params.funding.get(&a.contributor_email).copied().unwrap_or(0.0);
                let funding_share = if total_funding > 0.0 {
                    funding / total_funding * (1.0 - sweat)
                } else {
                    0.0
                };
                let combined = a.weight * sweat + funding_share;
                let s = floor_shares(combined, total_shares);
                share_row(a, s, total_shares, funding_rights(combined * 100.0, funding))
            })
            .collect();

        PolicyOutcome {
            shares,
            applied: PolicyType::FundingBased,
            notices,
        }
    }
}

/// Attribution weight scaled by each holder's vested fraction
#[derive(Debug, Clone)]
pub struct TimeVestedPolicy {
    params: TimeVestedParams,
}

impl TimeVestedPolicy {
    /// Create the policy
    pub fn new(params: TimeVestedParams) -> Self {
        Self { params }
    }

    fn months_for(&self, email: &str) -> f64 {
        self.params
            .time_data
            .get(email)
            .copied()
            .unwrap_or(self.params.default_months)
    }

    fn notices(&self, attributions: &[ContributorAttribution]) -> Vec<String> {
        let mut notices = Vec::new();

        let defaulted: Vec<&str> = attributions
            .iter()
            .filter(|a| !self.params.time_data.contains_key(&a.contributor_email))
            .map(|a| a.contributor_email.as_str())
            .collect();
        if !defaulted.is_empty() {
            notices.push(format!(
                "no time data for {}; assumed {} months contributed",
                defaulted.join(", "),
                self.params.default_months
            ));
        }

        let unknown: Vec<&str> = self
            .params
            .time_data
            .keys()
            .filter(|email| !attributions.iter().any(|a| &a.contributor_email == *email))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            notices.push(format!(
                "time data for unknown contributors ignored: {}",
                unknown.join(", ")
            ));
        }

        notices
    }
}

impl AllocationPolicy for TimeVestedPolicy {
    fn policy_type(&self) -> PolicyType {
        PolicyType::TimeVested
    }

    fn allocate(&self, attributions: &[ContributorAttribution], total_shares: u64) -> PolicyOutcome {
        let shares = attributions
            .iter()
            .map(|a| {
                let fraction = vested_fraction(
                    self.months_for(&a.contributor_email),
                    self.params.cliff_months,
                    self.params.vesting_period_months,
                );
                let s = floor_shares(a.weight * fraction, total_shares);
                share_row(a, s, total_shares, vesting_rights(fraction))
            })
            .collect();

        PolicyOutcome {
            shares,
            applied: PolicyType::TimeVested,
            notices: self.notices(attributions),
        }
    }
}

/// Months-contributed lookup built from `(email, months)` pairs
pub fn time_data<I, S>(entries: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = (S, f64)>,
    S: Into<String>,
{
    entries.into_iter().map(|(e, m)| (e.into(), m)).collect()
}
