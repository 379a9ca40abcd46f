//! Subnet CIDR calculator.
//!
//! Splits a VPC network into one block per zone for every labelled request,
//! biggest blocks first, and keeps the last three /28s for the transit
//! gateway label.
//!
//! ```
//! use subnet_calculator::allocation::NoopObserver;
//! use subnet_calculator::calculate_subnet_cidrs;
//! use subnet_calculator::models::SubnetRequest;
//!
//! let subnets = vec![
//!     SubnetRequest::new("Private1", 26).unwrap(),
//!     SubnetRequest::new("TGW", 28).unwrap(),
//! ];
//! let plan = calculate_subnet_cidrs("10.113.0.0/24", &subnets, 3, Some("TGW"), &mut NoopObserver)
//!     .unwrap();
//! assert_eq!(plan.get("TGW").unwrap()[0].to_string(), "10.113.0.208/28");
//! ```

pub mod allocation;
pub mod cfn;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

use allocation::LogObserver;
use cfn::{handle_request, read_event_file, send_response, CfnResponse};
use config::Settings;
use models::{Ipv4, SubnetPlan, SubnetRequest};
use processing::verify_plan;
use std::error::Error;

pub use allocation::calculate_subnet_cidrs;
pub use error::CalcError;

/// Plan `LABEL=PREFIX` pairs for `vpc_network`, logging each step, and verify the result.
pub fn plan_from_pairs(
    vpc_network: &str,
    pairs: &[String],
    azs: usize,
    tail_label: Option<&str>,
) -> Result<(Ipv4, SubnetPlan), Box<dyn Error>> {
    let subnets = pairs
        .iter()
        .map(|pair| SubnetRequest::parse_pair(pair))
        .collect::<Result<Vec<_>, _>>()?;
    let vpc = Ipv4::new(vpc_network)?;
    let plan = calculate_subnet_cidrs(vpc_network, &subnets, azs, tail_label, &mut LogObserver)?;
    verify_plan(&vpc, &plan, tail_label)?;
    log::info!("Planned {} labels in {vpc}", plan.len());
    Ok((vpc, plan))
}

/// Handle the custom resource event in `path` and send the response, unless `dry_run`.
pub async fn process_event_file(
    path: &str,
    settings: &Settings,
    dry_run: bool,
) -> Result<CfnResponse, Box<dyn Error>> {
    let request = read_event_file(path)?;
    let response = handle_request(&request, settings);

    if dry_run {
        log::warn!("Dry run, not sending response to {}", request.response_url);
    } else {
        let client = reqwest::Client::new();
        send_response(&client, &request.response_url, &response).await?;
    }
    Ok(response)
}
