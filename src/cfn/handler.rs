//! Turn a custom resource request into a response.
//!
//! Never fails: any error becomes a FAILED response carrying the message.

use super::event::{CfnRequest, RequestType};
use super::response::CfnResponse;
use crate::allocation::{calculate_subnet_cidrs, LogObserver};
use crate::config::{Settings, PHYSICAL_ID_PREFIX};
use crate::error::CalcError;
use crate::models::{parse_requests, SubnetPlan};

const UNSET_PHYSICAL_ID: &str = "unset";

/// Handle a Create, Update or Delete request.
pub fn handle_request(request: &CfnRequest, settings: &Settings) -> CfnResponse {
    log::info!(
        "{} request {} for {}",
        request.request_type,
        request.request_id,
        request.logical_resource_id
    );

    match request.kind() {
        // Nothing to delete
        Ok(RequestType::Delete) => {
            let physical_id = request
                .physical_resource_id
                .clone()
                .unwrap_or_else(|| UNSET_PHYSICAL_ID.to_string());
            CfnResponse::success(request, physical_id, SubnetPlan::new())
        }
        Ok(RequestType::Create | RequestType::Update) => {
            let physical_id = physical_resource_id(request);
            match plan_for_request(request, settings) {
                Ok(plan) => {
                    log::info!("Returning plan:\n{plan}");
                    CfnResponse::success(request, physical_id, plan)
                }
                Err(e) => {
                    log::error!("ERROR: {e}");
                    CfnResponse::failed(request, physical_id, e.to_string())
                }
            }
        }
        Err(e) => {
            log::error!("ERROR: {e}");
            let physical_id = request
                .physical_resource_id
                .clone()
                .unwrap_or_else(|| physical_resource_id(request));
            CfnResponse::failed(request, physical_id, e.to_string())
        }
    }
}

/// `subnet-calc-<VPCNetwork>`, or `unset` if the property is missing.
pub fn physical_resource_id(request: &CfnRequest) -> String {
    match request.vpc_network() {
        Some(vpc) => format!("{PHYSICAL_ID_PREFIX}{vpc}"),
        None => UNSET_PHYSICAL_ID.to_string(),
    }
}

fn plan_for_request(request: &CfnRequest, settings: &Settings) -> Result<SubnetPlan, CalcError> {
    let props = request.properties()?;
    let vpc_network = props
        .vpc_network
        .as_deref()
        .ok_or_else(|| CalcError::parse("VPCNetwork", "Missing property"))?;
    let azs = match &props.azs {
        Some(azs) => azs.to_azs()?,
        None => settings.azs,
    };
    let subnets = parse_requests(&props.subnets)?;

    calculate_subnet_cidrs(
        vpc_network,
        &subnets,
        azs,
        settings.tail_label.as_deref(),
        &mut LogObserver,
    )
}
