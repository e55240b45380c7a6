//! Rounding drift reconciliation
//!
//! Policies floor every holding, so the table usually comes up a few shares
//! short of the total. The whole drift goes to the single largest holder
//! (first one wins a tie), whose percentage is then recomputed.

use crate::allocation::percentage_of;
use crate::error::DomainError;
use crate::ownership::OwnershipShare;

/// Index of the largest holder, first-encountered on ties
pub fn largest_holder(shares: &[OwnershipShare]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, share) in shares.iter().enumerate() {
        match best {
            Some(b) if shares[b].shares >= share.shares => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Force the table to sum to `total_shares` exactly
///
/// Returns the drift that was applied (positive when shares were added).
/// An empty table is left untouched and reports zero drift.
pub fn reconcile(shares: &mut [OwnershipShare], total_shares: u64) -> Result<i64, DomainError> {
    let Some(idx) = largest_holder(shares) else {
        return Ok(0);
    };

    let allocated: i128 = shares.iter().map(|s| i128::from(s.shares)).sum();
    let drift = i128::from(total_shares) - allocated;
    if drift == 0 {
        return Ok(0);
    }

    let largest = shares[idx].shares;
    let adjusted = i128::from(largest) + drift;
    let drift_i64 = i64::try_from(drift).unwrap_or(if drift < 0 { i64::MIN } else { i64::MAX });
    if adjusted < 0 {
        return Err(DomainError::Reconciliation {
            drift: drift_i64,
            largest,
        });
    }

    let adjusted = u64::try_from(adjusted).map_err(|_| DomainError::Reconciliation {
        drift: drift_i64,
        largest,
    })?;

    let holder = &mut shares[idx];
    holder.shares = adjusted;
    holder.percentage = percentage_of(adjusted, total_shares);
    Ok(drift_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ownership::GovernanceRights;

    fn row(name: &str, shares: u64, total: u64) -> OwnershipShare {
        OwnershipShare {
            contributor_email: format!("{}@x.io", name),
            contributor_name: name.to_string(),
            shares,
            percentage: percentage_of(shares, total),
            governance_rights: GovernanceRights::Standard,
        }
    }

    #[test]
    fn test_shortfall_goes_to_largest() {
        let mut table = vec![row("a", 333, 1000), row("b", 497, 1000), row("c", 167, 1000)];
        let drift = reconcile(&mut table, 1000).unwrap();

        assert_eq!(drift, 3);
        assert_eq!(table[1].shares, 500);
        assert_eq!(table[1].percentage, 50.0);
        assert_eq!(table[0].shares, 333);
        assert_eq!(table[2].shares, 167);
    }

    #[test]
    fn test_tie_breaks_on_first() {
        let mut table = vec![row("a", 40, 100), row("b", 40, 100), row("c", 18, 100)];
        reconcile(&mut table, 100).unwrap();
        assert_eq!(table[0].shares, 42);
        assert_eq!(table[1].shares, 40);
    }

    #[test]
    fn test_exact_table_untouched() {
        let mut table = vec![row("a", 60, 100), row("b", 40, 100)];
        let before = table.clone();
        assert_eq!(reconcile(&mut table, 100).unwrap(), 0);
        assert_eq!(table, before);
    }

    #[test]
    fn test_surplus_removed_from_largest() {
        let mut table = vec![row("a", 55, 100), row("b", 47, 100)];
        assert_eq!(reconcile(&mut table, 100).unwrap(), -2);
        assert_eq!(table[0].shares, 53);
    }

    #[test]
    fn test_impossible_surplus_is_error() {
        let mut table = vec![row("a", 10, 10), row("b", 10, 10), row("c", 10, 10)];
        let err = reconcile(&mut table, 10).unwrap_err();
        assert_eq!(err, DomainError::Reconciliation { drift: -20, largest: 10 });
    }

    #[test]
    fn test_empty_table() {
        let mut table: Vec<OwnershipShare> = Vec::new();
        assert_eq!(reconcile(&mut table, 1000).unwrap(), 0);
        assert_eq!(largest_holder(&table), None);
    }
}
