//! Ownership finalization
//!
//! allocate → reconcile → summarize, over validated attributions.

use crate::allocation::policy_for;
use crate::attribution::ContributorAttribution;
use crate::error::DomainError;
use crate::governance::summarize;
use crate::ownership::{OwnershipArrangement, PolicyParams};
use crate::reconciliation::reconcile;
use std::collections::HashSet;

/// Slack allowed above 1.0 when summing incoming weights
pub const WEIGHT_SUM_SLACK: f64 = 1e-6;

/// Summary used when there is nobody to allocate to
pub const NO_CONTRIBUTORS_SUMMARY: &str = "No contributors provided for ownership arrangement.";

/// Check incoming attribution weights
///
/// Every weight must be finite and in [0, 1] and emails must be unique.
/// The sum is not checked here: a deficit is absorbed by reconciliation and
/// a surplus is scaled away by [`scale_surplus`].
pub fn validate_attributions(attributions: &[ContributorAttribution]) -> Result<(), DomainError> {
    let mut seen = HashSet::new();

    for a in attributions {
        if a.contributor_email.trim().is_empty() {
            return Err(DomainError::Validation(
                "attribution has an empty contributor_email".to_string(),
            ));
        }
        if !seen.insert(a.contributor_email.as_str()) {
            return Err(DomainError::Validation(format!(
                "duplicate attribution for '{}'",
                a.contributor_email
            )));
        }
        if !a.weight.is_finite() || !(0.0..=1.0).contains(&a.weight) {
            return Err(DomainError::Validation(format!(
                "weight for '{}' must be in [0, 1], got {}",
                a.contributor_email, a.weight
            )));
        }
    }
    Ok(())
}

/// Scale weights summing above 1.0 back down to 1.0
///
/// Hand-edited percentages often total slightly over 100%. Sums within
/// [`WEIGHT_SUM_SLACK`] of 1.0 are left alone. Returns the scaled copy and
/// a notice, or `None` when nothing changed.
pub fn scale_surplus(
    attributions: &[ContributorAttribution],
) -> Option<(Vec<ContributorAttribution>, String)> {
    let sum: f64 = attributions.iter().map(|a| a.weight).sum();
    if sum <= 1.0 + WEIGHT_SUM_SLACK {
        return None;
    }

    let scaled = attributions
        .iter()
        .map(|a| ContributorAttribution {
            weight: a.weight / sum,
            ..a.clone()
        })
        .collect();
    let notice = format!(
        "Attribution weights sum to {:.1}%; scaled proportionally to 100% before allocation",
        sum * 100.0
    );
    Some((scaled, notice))
}

/// Turn attributions into a reconciled ownership arrangement
///
/// The share sum equals `total_shares` exactly for a non-empty input. An
/// empty input yields an empty table with `total_shares` 0.
pub fn finalize_ownership(
    asset_id: Option<i64>,
    attributions: &[ContributorAttribution],
    params: &PolicyParams,
) -> Result<OwnershipArrangement, DomainError> {
    validate_attributions(attributions)?;
    params.validate()?;

    if attributions.is_empty() {
        return Ok(OwnershipArrangement {
            asset_id,
            ownership_table: Vec::new(),
            total_shares: 0,
            governance_summary: NO_CONTRIBUTORS_SUMMARY.to_string(),
            policy_applied: params.policy_type(),
            warnings: Vec::new(),
        });
    }

    let mut warnings = Vec::new();
    let scaled = scale_surplus(attributions).map(|(scaled, notice)| {
        warnings.push(notice);
        scaled
    });
    let attributions = scaled.as_deref().unwrap_or(attributions);

    let total_shares = params.total_shares();
    let outcome = policy_for(params).allocate(attributions, total_shares);

    let mut table = outcome.shares;
    reconcile(&mut table, total_shares)?;
    let governance_summary = summarize(&table, outcome.applied);
    warnings.extend(outcome.notices);

    Ok(OwnershipArrangement {
        asset_id,
        ownership_table: table,
        total_shares,
        governance_summary,
        policy_applied: outcome.applied,
        warnings,
    })
}
