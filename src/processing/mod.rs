//! Plan post-processing.
//!
//! This module contains checks and reports run on a finished plan:
//! - [`gap_finder`] - Finding unused space between planned subnets
//! - [`overlap`] - Detecting blocks handed out twice or outside the VPC

mod gap_finder;
mod overlap;

// Re-export public functions
pub use gap_finder::{find_gaps, plan_rows, PlanRow};
pub use overlap::{find_overlapping_blocks, log_overlapping_blocks, verify_plan, OverlapConflict};
