//! Gap finding between planned subnets.
//!
//! Identifies unused address ranges left in the VPC after a plan, and lays
//! out plan and gap rows in address order for output.

use crate::error::CalcError;
use crate::models::{lo_mask, num_usable_hosts, Ipv4, SubnetPlan, MAX_LENGTH};
use std::net::Ipv4Addr;

const GAP: &str = "-gap-";

/// Represents a row of plan data for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRow {
    /// Row index (0 for gap rows).
    pub j: usize,
    /// Label, or `-gap-` for unused space.
    pub label: String,
    /// Zone number counted from 1 (0 for gap rows).
    pub az: usize,
    /// Subnet CIDR notation.
    pub subnet_cidr: String,
    /// Broadcast address.
    pub broadcast: String,
    /// Usable host addresses.
    pub usable_hosts: u64,
}

impl PlanRow {
    fn new(j: usize, label: &str, az: usize, block: &Ipv4) -> PlanRow {
        PlanRow {
            j,
            label: label.to_string(),
            az,
            subnet_cidr: block.to_string(),
            broadcast: block.hi().to_string(),
            usable_hosts: num_usable_hosts(block.mask()).unwrap_or(0),
        }
    }

    pub fn is_gap(&self) -> bool {
        self.label == GAP
    }
}

/// Plan rows sorted by address, with `-gap-` rows for unused space when asked.
pub fn plan_rows(
    vpc: &Ipv4,
    plan: &SubnetPlan,
    include_gaps: bool,
) -> Result<Vec<PlanRow>, CalcError> {
    let mut planned: Vec<(Ipv4, &str, usize)> = plan
        .iter()
        .flat_map(|(label, blocks)| {
            blocks
                .iter()
                .enumerate()
                .map(move |(zone, block)| (*block, label, zone + 1))
        })
        .collect();
    if include_gaps {
        planned.extend(find_gaps(vpc, plan)?.into_iter().map(|gap| (gap, GAP, 0)));
    }
    planned.sort_by_key(|(block, _, _)| *block);

    let mut j = 0;
    let rows = planned
        .iter()
        .map(|(block, label, az)| {
            if *label == GAP {
                PlanRow::new(0, label, *az, block)
            } else {
                j += 1;
                PlanRow::new(j, label, *az, block)
            }
        })
        .collect();
    Ok(rows)
}

/// The largest aligned blocks covering every address of `vpc` the plan leaves unused.
pub fn find_gaps(vpc: &Ipv4, plan: &SubnetPlan) -> Result<Vec<Ipv4>, CalcError> {
    let mut used: Vec<Ipv4> = plan.blocks().map(|(_, block)| block).collect();
    used.sort();

    let vpc_end = u64::from(u32::from(vpc.lo())) + vpc.size();
    let mut next_ip = u64::from(u32::from(vpc.lo()));
    let mut gaps = Vec::new();

    for block in used {
        let start = u64::from(u32::from(block.lo()));
        if start > next_ip {
            fill_gap(next_ip, start.min(vpc_end), &mut gaps)?;
        }
        next_ip = next_ip.max(start + block.size());
    }
    if next_ip < vpc_end {
        fill_gap(next_ip, vpc_end, &mut gaps)?;
    }
    Ok(gaps)
}

/// Cover `[next_ip, limit)` with the fewest aligned blocks.
fn fill_gap(mut next_ip: u64, limit: u64, gaps: &mut Vec<Ipv4>) -> Result<(), CalcError> {
    while next_ip < limit {
        let start_ip = Ipv4Addr::from(next_ip as u32);
        let mask = find_biggest_subnet(start_ip, limit);
        let gap = Ipv4::from_parts(start_ip, mask)?;
        next_ip += gap.size();
        gaps.push(gap);
    }
    Ok(())
}

/// Find the biggest subnet starting at `start_ip` that ends before `limit`.
///
/// The returned mask is constrained by:
/// 1. The IP alignment - `start_ip` must be a valid network address for the mask
/// 2. The subnet must not reach `limit` (exclusive upper address)
fn find_biggest_subnet(start_ip: Ipv4Addr, limit: u64) -> u8 {
    let start = u64::from(u32::from(start_ip));
    let mut next_mask = lo_mask(start_ip);
    while next_mask < MAX_LENGTH && start + (1u64 << (MAX_LENGTH - next_mask)) > limit {
        next_mask += 1;
    }
    next_mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> Ipv4 {
        Ipv4::new(s).unwrap()
    }

    #[test]
    fn test_find_biggest_subnet() {
        let limit = |s: &str| u64::from(u32::from(net(s).lo()));
        // 10.0.0.0 is aligned to any mask
        let start_ip = Ipv4Addr::new(10, 0, 0, 0);
        assert_eq!(24, find_biggest_subnet(start_ip, limit("10.0.1.0/24")));
        assert_eq!(13, find_biggest_subnet(start_ip, limit("10.11.16.0/24")));
        assert_eq!(9, find_biggest_subnet(start_ip, limit("10.192.0.0/24")));

        // 10.11.12.16 has 4 trailing zeros, so min mask = 28
        let start_ip = Ipv4Addr::new(10, 11, 12, 16);
        assert_eq!(28, find_biggest_subnet(start_ip, limit("10.11.16.0/24")));

        // 10.11.12.0 can be a /22 network address
        let start_ip = Ipv4Addr::new(10, 11, 12, 0);
        assert_eq!(22, find_biggest_subnet(start_ip, limit("10.11.16.0/24")));
    }

    #[test]
    fn test_find_gaps() {
        let vpc = net("10.113.0.0/24");
        let mut plan = SubnetPlan::new();
        plan.insert(
            "Private1",
            vec![
                net("10.113.0.0/26"),
                net("10.113.0.64/26"),
                net("10.113.0.128/26"),
            ],
        );
        plan.insert(
            "TGW",
            vec![
                net("10.113.0.208/28"),
                net("10.113.0.224/28"),
                net("10.113.0.240/28"),
            ],
        );
        assert_eq!(find_gaps(&vpc, &plan).unwrap(), vec![net("10.113.0.192/28")]);
    }

    #[test]
    fn test_find_gaps_empty_plan_and_full_plan() {
        let vpc = net("10.113.0.0/23");
        assert_eq!(find_gaps(&vpc, &SubnetPlan::new()).unwrap(), vec![vpc]);

        let mut plan = SubnetPlan::new();
        plan.insert("All", vec![vpc]);
        assert!(find_gaps(&vpc, &plan).unwrap().is_empty());

        let everything = net("0.0.0.0/0");
        assert_eq!(find_gaps(&everything, &SubnetPlan::new()).unwrap(), vec![everything]);
    }

    #[test]
    fn test_find_gaps_unaligned_hole() {
        let vpc = net("10.6.0.0/20");
        let mut plan = SubnetPlan::new();
        plan.insert("A", vec![net("10.6.0.0/28"), net("10.6.8.0/21")]);
        let gaps: Vec<String> = find_gaps(&vpc, &plan)
            .unwrap()
            .iter()
            .map(|g| g.to_string())
            .collect();
        assert_eq!(
            gaps,
            vec![
                "10.6.0.16/28",
                "10.6.0.32/27",
                "10.6.0.64/26",
                "10.6.0.128/25",
                "10.6.1.0/24",
                "10.6.2.0/23",
                "10.6.4.0/22"
            ]
        );
    }

    #[test]
    fn test_plan_rows() {
        let vpc = net("10.113.0.0/24");
        let mut plan = SubnetPlan::new();
        plan.insert("Public", vec![net("10.113.0.128/26"), net("10.113.0.0/26")]);

        let rows = plan_rows(&vpc, &plan, true).unwrap();
        let summary: Vec<(usize, &str, usize, &str)> = rows
            .iter()
            .map(|r| (r.j, r.label.as_str(), r.az, r.subnet_cidr.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, "Public", 2, "10.113.0.0/26"),
                (0, "-gap-", 0, "10.113.0.64/26"),
                (2, "Public", 1, "10.113.0.128/26"),
                (0, "-gap-", 0, "10.113.0.192/26"),
            ]
        );
        assert_eq!(rows[0].broadcast, "10.113.0.63");
        assert_eq!(rows[0].usable_hosts, 59);
        assert!(rows[1].is_gap());

        assert_eq!(plan_rows(&vpc, &plan, false).unwrap().len(), 2);
    }
}
