//! Governance summary text
//!
//! Informational only. Nothing downstream parses it.

use crate::allocation::{MAJORITY_THRESHOLD, SIGNIFICANT_THRESHOLD};
use crate::ownership::{OwnershipShare, PolicyType};

/// Summary used when the table is empty
pub const EMPTY_SUMMARY: &str = "No ownership structure defined.";

/// Fixed governance note for a policy
pub fn policy_note(policy: PolicyType) -> &'static str {
    match policy {
        PolicyType::Equal => "All contributors have equal voting rights.",
        PolicyType::Weighted => "Voting rights proportional to contribution weights.",
        PolicyType::FundingBased => {
            "Governance includes both sweat equity and financial investment considerations."
        }
        PolicyType::TimeVested => "Ownership subject to time-based vesting schedules.",
    }
}

/// Describe the control structure of a finished table
pub fn summarize(shares: &[OwnershipShare], policy: PolicyType) -> String {
    if shares.is_empty() {
        return EMPTY_SUMMARY.to_string();
    }

    let mut parts = vec![format!(
        "Ownership distributed among {} contributors using {} policy.",
        shares.len(),
        policy
    )];

    let majority = shares.iter().find(|s| s.percentage >= MAJORITY_THRESHOLD);
    let significant: Vec<String> = shares
        .iter()
        .filter(|s| s.percentage >= SIGNIFICANT_THRESHOLD && s.percentage < MAJORITY_THRESHOLD)
        .map(|s| format!("{} ({:.1}%)", s.contributor_name, s.percentage))
        .collect();

    if let Some(holder) = majority {
        parts.push(format!(
            "Majority control: {} ({:.1}%).",
            holder.contributor_name, holder.percentage
        ));
    } else if !significant.is_empty() {
        parts.push(format!("Significant stakeholders: {}.", significant.join(", ")));
    } else {
        parts.push("No single majority holder - distributed ownership structure.".to_string());
    }

    parts.push(policy_note(policy).to_string());
    parts.join(" ")
}
