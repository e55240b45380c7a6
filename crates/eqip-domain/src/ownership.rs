//! Ownership model and policy parameters

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Share count used when a request does not name one
pub const DEFAULT_TOTAL_SHARES: u64 = 1_000_000;

/// Default portion of ownership attributed to labor in funding-based splits
pub const DEFAULT_SWEAT_EQUITY_WEIGHT: f64 = 0.3;

/// Default vesting period (4 years)
pub const DEFAULT_VESTING_PERIOD_MONTHS: f64 = 48.0;

/// Default cliff (1 year)
pub const DEFAULT_CLIFF_MONTHS: f64 = 12.0;

/// Months assumed for a contributor missing from the time data
pub const DEFAULT_MONTHS_CONTRIBUTED: f64 = 12.0;

/// Ownership policy discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyType {
    /// Even split
    Equal,
    /// Proportional to attribution weight
    Weighted,
    /// Blend of sweat equity and financial investment
    FundingBased,
    /// Attribution weight scaled by vesting progress
    TimeVested,
}

impl PolicyType {
    /// Get the policy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::Equal => "equal",
            PolicyType::Weighted => "weighted",
            PolicyType::FundingBased => "funding_based",
            PolicyType::TimeVested => "time_vested",
        }
    }

    /// Parse a policy type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "equal" => Some(PolicyType::Equal),
            "weighted" => Some(PolicyType::Weighted),
            "funding_based" | "funding" => Some(PolicyType::FundingBased),
            "time_vested" | "vested" => Some(PolicyType::TimeVested),
            _ => None,
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PolicyType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::UnsupportedPolicy(s.to_string()))
    }
}

/// Control tier of a shareholder
///
/// Derived purely from computed percentage or vesting progress; not a legal
/// grant by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernanceRights {
    /// Equal split, equal say
    Equal,
    /// 50% or more
    Majority,
    /// 25% to 50%
    Significant,
    /// Ordinary holder
    Standard,
    /// Under 10% (weighted policy)
    Minority,
    /// Holder with a funding stake
    Investor,
    /// Vesting complete
    FullyVested,
    /// More than half vested
    PartiallyVested,
    /// Past the cliff, at most half vested
    CliffVested,
    /// Before the cliff
    Unvested,
}

impl GovernanceRights {
    /// Get the label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            GovernanceRights::Equal => "equal",
            GovernanceRights::Majority => "majority",
            GovernanceRights::Significant => "significant",
            GovernanceRights::Standard => "standard",
            GovernanceRights::Minority => "minority",
            GovernanceRights::Investor => "investor",
            GovernanceRights::FullyVested => "fully_vested",
            GovernanceRights::PartiallyVested => "partially_vested",
            GovernanceRights::CliffVested => "cliff_vested",
            GovernanceRights::Unvested => "unvested",
        }
    }
}

impl fmt::Display for GovernanceRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the ownership table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipShare {
    /// Contributor identity
    pub contributor_email: String,

    /// Contributor display name
    pub contributor_name: String,

    /// Whole shares held
    pub shares: u64,

    /// `shares / total_shares * 100`
    pub percentage: f64,

    /// Control tier
    pub governance_rights: GovernanceRights,
}

/// A finalized ownership arrangement
///
/// Immutable once created; a later finalize replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipArrangement {
    /// Asset the arrangement is for, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,

    /// Ownership table; shares sum to `total_shares`
    pub ownership_table: Vec<OwnershipShare>,

    /// Total shares issued
    pub total_shares: u64,

    /// Informational description of the control structure
    pub governance_summary: String,

    /// Policy that actually produced the table
    pub policy_applied: PolicyType,

    /// Degradations applied while producing this arrangement
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl OwnershipArrangement {
    /// Look up a holder's row
    pub fn get(&self, email: &str) -> Option<&OwnershipShare> {
        self.ownership_table.iter().find(|s| s.contributor_email == email)
    }

    /// Sum of all shares in the table
    pub fn allocated_shares(&self) -> u64 {
        self.ownership_table.iter().map(|s| s.shares).sum()
    }
}

/// Parameters of the equal policy
#[derive(Debug, Clone, PartialEq)]
pub struct EqualParams {
    /// Shares to distribute
    pub total_shares: u64,
}

/// Parameters of the weighted policy
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedParams {
    /// Shares to distribute
    pub total_shares: u64,
}

/// Parameters of the funding-based policy
#[derive(Debug, Clone, PartialEq)]
pub struct FundingParams {
    /// Shares to distribute
    pub total_shares: u64,

    /// Funding amount per contributor email
    pub funding: BTreeMap<String, f64>,

    /// Portion of ownership attributed to labor, in [0, 1]
    pub sweat_equity_weight: f64,
}

/// Parameters of the time-vested policy
#[derive(Debug, Clone, PartialEq)]
pub struct TimeVestedParams {
    /// Shares to distribute
    pub total_shares: u64,

    /// Months until fully vested
    pub vesting_period_months: f64,

    /// Months before anything vests
    pub cliff_months: f64,

    /// Months contributed per contributor email
    pub time_data: BTreeMap<String, f64>,

    /// Months assumed for contributors missing from `time_data`
    pub default_months: f64,
}

/// Typed policy selection, one variant per policy
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyParams {
    /// Even split
    Equal(EqualParams),
    /// Proportional to weight
    Weighted(WeightedParams),
    /// Sweat equity plus funding
    FundingBased(FundingParams),
    /// Weight scaled by vesting
    TimeVested(TimeVestedParams),
}

impl PolicyParams {
    /// Equal policy over `total_shares`
    pub fn equal(total_shares: u64) -> Self {
        PolicyParams::Equal(EqualParams { total_shares })
    }

    /// Weighted policy over `total_shares`
    pub fn weighted(total_shares: u64) -> Self {
        PolicyParams::Weighted(WeightedParams { total_shares })
    }

    /// The policy discriminant
    pub fn policy_type(&self) -> PolicyType {
        match self {
            PolicyParams::Equal(_) => PolicyType::Equal,
            PolicyParams::Weighted(_) => PolicyType::Weighted,
            PolicyParams::FundingBased(_) => PolicyType::FundingBased,
            PolicyParams::TimeVested(_) => PolicyType::TimeVested,
        }
    }

    /// Shares to distribute
    pub fn total_shares(&self) -> u64 {
        match self {
            PolicyParams::Equal(p) => p.total_shares,
            PolicyParams::Weighted(p) => p.total_shares,
            PolicyParams::FundingBased(p) => p.total_shares,
            PolicyParams::TimeVested(p) => p.total_shares,
        }
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.total_shares() == 0 {
            return Err(DomainError::Configuration(
                "total_shares must be greater than 0".to_string(),
            ));
        }

        match self {
            PolicyParams::Equal(_) | PolicyParams::Weighted(_) => Ok(()),
            PolicyParams::FundingBased(p) => {
                if !(0.0..=1.0).contains(&p.sweat_equity_weight) {
                    return Err(DomainError::Configuration(format!(
                        "sweat_equity_weight must be in [0, 1], got {}",
                        p.sweat_equity_weight
                    )));
                }
                for (email, amount) in &p.funding {
                    if !amount.is_finite() || *amount < 0.0 {
                        return Err(DomainError::Configuration(format!(
                            "funding for '{}' must be a finite non-negative amount, got {}",
                            email, amount
                        )));
                    }
                }
                Ok(())
            }
            PolicyParams::TimeVested(p) => {
                if !p.vesting_period_months.is_finite() || p.vesting_period_months <= 0.0 {
                    return Err(DomainError::Configuration(format!(
                        "vesting_period_months must be positive, got {}",
                        p.vesting_period_months
                    )));
                }
                if !p.cliff_months.is_finite() || p.cliff_months < 0.0 {
                    return Err(DomainError::Configuration(format!(
                        "cliff_months must be non-negative, got {}",
                        p.cliff_months
                    )));
                }
                let months = p.time_data.iter().map(|(e, m)| (e.as_str(), *m));
                for (email, m) in months.chain(std::iter::once(("<default>", p.default_months))) {
                    if !m.is_finite() || m < 0.0 {
                        return Err(DomainError::Configuration(format!(
                            "months contributed for '{}' must be non-negative, got {}",
                            email, m
                        )));
                    }
                }
                Ok(())
            }
        }
    }
}
