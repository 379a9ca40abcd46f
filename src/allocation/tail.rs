//! Fixed reservation at the end of the VPC.
//!
//! The last [`TAIL_RESERVATION_COUNT`] `/28` blocks of the original network
//! belong to the tail label (transit gateway attachments). They are checked
//! against the free space left after every other request, but not removed
//! from it, so this step has to run last.

use super::pool::FreeSpacePool;
use crate::config::{TAIL_RESERVATION_COUNT, TAIL_RESERVATION_MASK};
use crate::error::CalcError;
use crate::models::Ipv4;

/// The blocks reserved at the end of `vpc`, lowest address first.
pub fn tail_blocks(vpc: &Ipv4, label: &str) -> Result<Vec<Ipv4>, CalcError> {
    if !vpc.can_hold(TAIL_RESERVATION_MASK) {
        return Err(CalcError::no_space(
            label,
            format!("{vpc} is smaller than a /{TAIL_RESERVATION_MASK}"),
        ));
    }
    let blocks = vpc.last_subnets(TAIL_RESERVATION_MASK, TAIL_RESERVATION_COUNT)?;
    if blocks.len() < TAIL_RESERVATION_COUNT {
        return Err(CalcError::no_space(
            label,
            format!(
                "{vpc} holds only {} /{TAIL_RESERVATION_MASK} blocks, {TAIL_RESERVATION_COUNT} are needed",
                blocks.len()
            ),
        ));
    }
    Ok(blocks)
}

/// Check that every tail block still sits inside free space.
///
/// `pool` is only read.
pub fn reserve_tail(vpc: &Ipv4, pool: &FreeSpacePool, label: &str) -> Result<Vec<Ipv4>, CalcError> {
    let blocks = tail_blocks(vpc, label)?;
    if let Some(taken) = blocks.iter().find(|b| !pool.covers(b)) {
        return Err(CalcError::no_space(
            label,
            format!("Could not fit {label} network {taken}"),
        ));
    }
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> Ipv4 {
        Ipv4::new(s).unwrap()
    }

    #[test]
    fn test_tail_blocks() {
        let blocks = tail_blocks(&net("10.113.0.0/22"), "TGW").unwrap();
        let text: Vec<String> = blocks.iter().map(|b| b.to_string()).collect();
        assert_eq!(
            text,
            vec!["10.113.3.208/28", "10.113.3.224/28", "10.113.3.240/28"]
        );
    }

    #[test]
    fn test_tail_blocks_too_small() {
        assert!(matches!(
            tail_blocks(&net("10.113.0.0/29"), "TGW"),
            Err(CalcError::NoSpace { .. })
        ));
        // a /27 only has two /28s
        assert!(matches!(
            tail_blocks(&net("10.113.0.0/27"), "TGW"),
            Err(CalcError::NoSpace { .. })
        ));
        assert_eq!(tail_blocks(&net("10.113.0.0/26"), "TGW").unwrap().len(), 3);
    }

    #[test]
    fn test_reserve_tail_does_not_consume() {
        let vpc = net("10.113.0.0/24");
        let mut pool = FreeSpacePool::new(vpc);
        for _ in 0..3 {
            pool.try_allocate(26).unwrap();
        }
        let before = pool.free_runs().to_vec();
        let blocks = reserve_tail(&vpc, &pool, "TGW").unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(pool.free_runs(), before.as_slice());
    }

    #[test]
    fn test_reserve_tail_collides() {
        let vpc = net("10.113.0.0/24");
        let mut pool = FreeSpacePool::new(vpc);
        pool.try_allocate(25).unwrap();
        pool.try_allocate(25).unwrap();
        let err = reserve_tail(&vpc, &pool, "TGW").unwrap_err();
        assert_eq!(
            err.to_string(),
            "No more space in given network for TGW: Could not fit TGW network 10.113.0.208/28"
        );
    }
}
