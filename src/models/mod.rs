//! Domain models for subnet calculation.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - aligned IPv4 address block in CIDR notation
//! - [`SubnetRequest`] - a labelled request for one block per zone
//! - [`SubnetPlan`] - the ordered label to blocks result

mod ipv4;
mod plan;
mod request;

// Re-export public types
pub use ipv4::{
    cut_addr, get_cidr_mask, lo_mask, num_usable_hosts, Ipv4, MAX_LENGTH, MAX_SUBDIVIDE_BITS,
    RESERVED_HOSTS,
};
pub use plan::SubnetPlan;
pub use request::{parse_requests, PrefixValue, RawSubnetRequest, SubnetRequest};
