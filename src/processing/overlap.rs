//! Overlapping block detection.
//!
//! Checks a finished plan: every block must sit inside the VPC, and no two
//! blocks may share addresses. The tail reservation is left out of the
//! pairwise check when asked, since it is never taken from the free space.

use crate::error::CalcError;
use crate::models::{Ipv4, SubnetPlan};
use itertools::Itertools;

/// Two planned blocks that share addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapConflict {
    pub first: (String, Ipv4),
    pub second: (String, Ipv4),
}

fn overlaps(a: &Ipv4, b: &Ipv4) -> bool {
    a.contains(b) || b.contains(a)
}

/// Find every pair of overlapping blocks, skipping `exclude_label`.
pub fn find_overlapping_blocks(
    plan: &SubnetPlan,
    exclude_label: Option<&str>,
) -> Vec<OverlapConflict> {
    let mut blocks: Vec<(&str, Ipv4)> = plan
        .blocks()
        .filter(|(label, _)| Some(*label) != exclude_label)
        .collect();
    blocks.sort_by_key(|(_, block)| *block);

    blocks
        .iter()
        .tuple_combinations()
        .filter(|((_, a), (_, b))| overlaps(a, b))
        .map(|((la, a), (lb, b))| OverlapConflict {
            first: (la.to_string(), *a),
            second: (lb.to_string(), *b),
        })
        .collect()
}

/// Log overlapping blocks as warnings.
pub fn log_overlapping_blocks(conflicts: &[OverlapConflict]) {
    if conflicts.is_empty() {
        log::info!("No overlapping subnets found.");
        return;
    }

    log::warn!("Found {} overlapping subnet pair(s):", conflicts.len());
    for conflict in conflicts {
        log::warn!(
            "  {} '{}' overlaps {} '{}'",
            conflict.first.1,
            conflict.first.0,
            conflict.second.1,
            conflict.second.0
        );
    }
}

/// Check that a plan stays inside `vpc` and hands out no address twice.
pub fn verify_plan(
    vpc: &Ipv4,
    plan: &SubnetPlan,
    tail_label: Option<&str>,
) -> Result<(), CalcError> {
    if let Some((label, block)) = plan.blocks().find(|(_, block)| !vpc.contains(block)) {
        return Err(CalcError::InvalidRequest {
            reason: format!("{label} block {block} is outside {vpc}"),
        });
    }

    let conflicts = find_overlapping_blocks(plan, tail_label);
    log_overlapping_blocks(&conflicts);
    match conflicts.first() {
        None => Ok(()),
        Some(c) => Err(CalcError::InvalidRequest {
            reason: format!(
                "{} block {} overlaps {} block {}",
                c.first.0, c.first.1, c.second.0, c.second.1
            ),
        }),
    }
}
