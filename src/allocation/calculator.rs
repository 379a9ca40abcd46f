//! Subnet CIDR calculation.
//!
//! Places one block per zone for every request, biggest blocks first, then
//! checks the tail reservation against what is left.

use super::observer::{AllocationEvent, AllocationObserver};
use super::pool::FreeSpacePool;
use super::tail::reserve_tail;
use crate::error::CalcError;
use crate::models::{Ipv4, SubnetPlan, SubnetRequest};
use std::collections::HashSet;

/// Calculate the CIDRs for the given subnet labels and prefixes.
///
/// # Arguments
/// * `vpc_network` - VPC network in the format X.X.X.X/XX, e.g. 10.123.0.0/24
/// * `subnets` - Requests in template order
/// * `azs` - Number of zones, one block per zone per request
/// * `tail_label` - Label placed in the last three /28s of the VPC, if any
/// * `observer` - Receives a trace of every step
///
/// # Returns
/// * `Ok(SubnetPlan)` - Labels in the order they were placed, tail label last
/// * `Err(CalcError)` - Nothing is returned unless every request fits
pub fn calculate_subnet_cidrs(
    vpc_network: &str,
    subnets: &[SubnetRequest],
    azs: usize,
    tail_label: Option<&str>,
    observer: &mut dyn AllocationObserver,
) -> Result<SubnetPlan, CalcError> {
    let vpc = Ipv4::new(vpc_network)?;
    validate_requests(subnets, azs)?;

    // For the algorithm to work, the bigger networks go first
    let mut ordered: Vec<&SubnetRequest> = subnets.iter().collect();
    ordered.sort_by_key(|s| s.prefix);

    let mut pool = FreeSpacePool::new(vpc);
    let mut plan = SubnetPlan::new();
    let mut has_tail = false;

    for subnet in ordered {
        if tail_label == Some(subnet.label.as_str()) {
            has_tail = true;
            observer.on_event(&AllocationEvent::Deferred {
                label: &subnet.label,
            });
            continue;
        }
        if subnet.is_skipped() {
            observer.on_event(&AllocationEvent::Skipped {
                label: &subnet.label,
            });
            continue;
        }

        let mut subnet_list = Vec::with_capacity(azs);
        for zone in 0..azs {
            observer.on_event(&AllocationEvent::FreeSpace {
                free: pool.free_runs(),
            });
            let block = pool.try_allocate(subnet.prefix)?.ok_or_else(|| {
                CalcError::no_space(
                    subnet.label.as_str(),
                    format!("zone {} of {azs} needs a /{}", zone + 1, subnet.prefix),
                )
            })?;
            observer.on_event(&AllocationEvent::Allocated {
                label: &subnet.label,
                zone,
                block,
            });
            subnet_list.push(block);
        }
        plan.insert(&subnet.label, subnet_list);
    }

    // Runs after every other request: the check does not take space from the pool
    if let (Some(label), true) = (tail_label, has_tail) {
        let blocks = reserve_tail(&vpc, &pool, label)?;
        observer.on_event(&AllocationEvent::TailReserved {
            label,
            blocks: &blocks,
        });
        plan.insert(label, blocks);
    }

    Ok(plan)
}

fn validate_requests(subnets: &[SubnetRequest], azs: usize) -> Result<(), CalcError> {
    if azs == 0 {
        return Err(CalcError::InvalidRequest {
            reason: "Number of AZs must be at least 1".to_string(),
        });
    }
    let mut seen = HashSet::new();
    for subnet in subnets {
        if !seen.insert(subnet.label.as_str()) {
            return Err(CalcError::InvalidRequest {
                reason: format!("Duplicate label {}", subnet.label),
            });
        }
    }
    Ok(())
}
