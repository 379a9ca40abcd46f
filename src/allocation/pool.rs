//! Free address space tracking.
//!
//! The pool starts as the whole VPC and shrinks as blocks are handed out.
//! Free space is held as runs of adjacent, equal-sized blocks, so splitting a
//! /0 into /32s costs one entry rather than four billion. Runs never overlap
//! and are kept sorted by address.

use crate::error::CalcError;
use crate::models::Ipv4;
use std::fmt;

/// `count` adjacent free blocks of the same size, starting at `first`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeRun {
    first: Ipv4,
    count: u64,
}

impl FreeRun {
    fn single(block: Ipv4) -> FreeRun {
        FreeRun {
            first: block,
            count: 1,
        }
    }

    /// The `count` blocks that follow `block`, if there are any.
    fn after(block: Ipv4, count: u64) -> Option<FreeRun> {
        if count == 0 {
            return None;
        }
        block.nth_after(1).map(|first| FreeRun { first, count })
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Prefix length shared by every block of the run.
    pub fn mask(&self) -> u8 {
        self.first.mask()
    }

    /// The blocks of the run, lowest address first.
    pub fn blocks(&self) -> impl Iterator<Item = Ipv4> + '_ {
        (0..self.count).filter_map(move |i| self.first.nth_after(i))
    }

    /// True if one block of the run contains all of `block`.
    fn covers(&self, block: &Ipv4) -> bool {
        let start = u64::from(u32::from(self.first.addr()));
        let end = start + self.count * self.first.size();
        let addr = u64::from(u32::from(block.addr()));
        // blocks are aligned, so a smaller block starting inside a piece stays inside it
        block.mask() >= self.mask() && addr >= start && addr < end
    }
}

impl fmt::Display for FreeRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 1 {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{} x{}", self.first, self.count)
        }
    }
}

/// Unallocated blocks of one calculation run.
#[derive(Debug, Clone)]
pub struct FreeSpacePool {
    runs: Vec<FreeRun>,
}

impl FreeSpacePool {
    /// A pool holding all of `network`.
    pub fn new(network: Ipv4) -> FreeSpacePool {
        FreeSpacePool {
            runs: vec![FreeRun::single(network)],
        }
    }

    /// Free runs in ascending address order.
    pub fn free_runs(&self) -> &[FreeRun] {
        &self.runs
    }

    /// Every free block in ascending address order.
    pub fn free_blocks(&self) -> impl Iterator<Item = Ipv4> + '_ {
        self.runs.iter().flat_map(|run| run.blocks())
    }

    /// Take a block of `/target_mask` from the first free block big enough to hold it.
    ///
    /// The chosen block is divided into `/target_mask` pieces; the first piece is
    /// returned and the rest go back into the pool ahead of the chosen block's
    /// free siblings. `Ok(None)` means no block fits.
    pub fn try_allocate(&mut self, target_mask: u8) -> Result<Option<Ipv4>, CalcError> {
        let Some(index) = self
            .runs
            .iter()
            .position(|run| run.first.can_hold(target_mask))
        else {
            return Ok(None);
        };
        let run = self.runs[index];
        let taken = Ipv4::from_parts(run.first.addr(), target_mask)?;
        let pieces = 1u64 << (target_mask - run.mask());

        let rest = [
            FreeRun::after(taken, pieces - 1),
            FreeRun::after(run.first, run.count - 1),
        ];
        self.runs.splice(index..=index, rest.into_iter().flatten());
        Ok(Some(taken))
    }

    /// True if a single free block contains all of `block`.
    pub fn covers(&self, block: &Ipv4) -> bool {
        self.runs.iter().any(|run| run.covers(block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> Ipv4 {
        Ipv4::new(s).unwrap()
    }

    fn free_text(pool: &FreeSpacePool) -> Vec<String> {
        pool.free_blocks().map(|b| b.to_string()).collect()
    }

    #[test]
    fn test_try_allocate_splits_first_fit() {
        let mut pool = FreeSpacePool::new(net("10.113.0.0/24"));
        assert_eq!(pool.try_allocate(26).unwrap(), Some(net("10.113.0.0/26")));
        assert_eq!(
            free_text(&pool),
            vec!["10.113.0.64/26", "10.113.0.128/26", "10.113.0.192/26"]
        );

        assert_eq!(pool.try_allocate(28).unwrap(), Some(net("10.113.0.64/28")));
        assert_eq!(
            free_text(&pool),
            vec![
                "10.113.0.80/28",
                "10.113.0.96/28",
                "10.113.0.112/28",
                "10.113.0.128/26",
                "10.113.0.192/26"
            ]
        );
        let runs: Vec<String> = pool.free_runs().iter().map(|r| r.to_string()).collect();
        assert_eq!(runs, vec!["10.113.0.80/28 x3", "10.113.0.128/26 x2"]);
    }

    #[test]
    fn test_try_allocate_takes_first_not_smallest() {
        let mut pool = FreeSpacePool {
            runs: vec![
                FreeRun::single(net("10.0.0.0/25")),
                FreeRun::single(net("10.0.0.128/27")),
            ],
        };
        // the exact /27 further up is ignored in favour of splitting the /25
        assert_eq!(pool.try_allocate(27).unwrap(), Some(net("10.0.0.0/27")));
        assert_eq!(
            free_text(&pool),
            vec![
                "10.0.0.32/27",
                "10.0.0.64/27",
                "10.0.0.96/27",
                "10.0.0.128/27"
            ]
        );
        // fragments never merge back into a /26
        assert_eq!(pool.try_allocate(26).unwrap(), None);
    }

    #[test]
    fn test_try_allocate_exhausts() {
        let mut pool = FreeSpacePool::new(net("10.113.0.0/24"));
        assert!(pool.try_allocate(25).unwrap().is_some());
        assert!(pool.try_allocate(25).unwrap().is_some());
        assert_eq!(pool.try_allocate(25).unwrap(), None);
        assert!(pool.free_runs().is_empty());
    }

    #[test]
    fn test_try_allocate_rejects_bigger_than_pool() {
        let mut pool = FreeSpacePool::new(net("10.113.0.0/24"));
        assert_eq!(pool.try_allocate(23).unwrap(), None);
        assert_eq!(pool.try_allocate(33).unwrap(), None);
        assert_eq!(free_text(&pool), vec!["10.113.0.0/24"]);
    }

    #[test]
    fn test_whole_address_space_into_hosts() {
        let mut pool = FreeSpacePool::new(net("0.0.0.0/0"));
        for host in ["0.0.0.0/32", "0.0.0.1/32", "0.0.0.2/32"] {
            assert_eq!(pool.try_allocate(32).unwrap(), Some(net(host)));
        }
        assert_eq!(pool.free_runs().len(), 1);
        assert_eq!(pool.free_runs()[0].count(), (1u64 << 32) - 3);
        assert!(pool.covers(&net("255.255.255.255/32")));
        assert!(!pool.covers(&net("0.0.0.2/32")));
        // every free block is a /32, so no single one holds a /28
        assert!(!pool.covers(&net("255.255.255.240/28")));
    }

    #[test]
    fn test_covers() {
        let mut pool = FreeSpacePool::new(net("10.113.0.0/24"));
        pool.try_allocate(26).unwrap();
        assert!(pool.covers(&net("10.113.0.240/28")));
        assert!(pool.covers(&net("10.113.0.64/26")));
        assert!(!pool.covers(&net("10.113.0.0/28")));
        // spans two free blocks
        assert!(!pool.covers(&net("10.113.0.128/25")));
    }
}
