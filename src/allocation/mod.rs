//! Address allocation.
//!
//! - [`pool`] - free space left in the VPC
//! - [`tail`] - the fixed reservation at the end of the VPC
//! - [`calculator`] - places every request and assembles the plan
//! - [`observer`] - trace hooks

mod calculator;
mod observer;
mod pool;
mod tail;

pub use calculator::calculate_subnet_cidrs;
pub use observer::{AllocationEvent, AllocationObserver, LogObserver, NoopObserver};
pub use pool::{FreeRun, FreeSpacePool};
pub use tail::{reserve_tail, tail_blocks};
