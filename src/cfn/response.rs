//! Responses sent back to CloudFormation.

use super::event::CfnRequest;
use crate::models::SubnetPlan;
use serde::Serialize;
use std::error::Error;

/// Reason given on success, when nothing went wrong to explain.
pub const DEFAULT_REASON: &str = "See the details in the subnet-calculator log output";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

/// Body PUT to the request's pre-signed `ResponseURL`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CfnResponse {
    pub status: ResponseStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub no_echo: bool,
    pub data: SubnetPlan,
}

impl CfnResponse {
    pub fn success(request: &CfnRequest, physical_resource_id: String, data: SubnetPlan) -> Self {
        CfnResponse {
            status: ResponseStatus::Success,
            reason: DEFAULT_REASON.to_string(),
            physical_resource_id,
            stack_id: request.stack_id.clone(),
            request_id: request.request_id.clone(),
            logical_resource_id: request.logical_resource_id.clone(),
            no_echo: false,
            data,
        }
    }

    pub fn failed(request: &CfnRequest, physical_resource_id: String, reason: String) -> Self {
        CfnResponse {
            status: ResponseStatus::Failed,
            reason,
            physical_resource_id,
            stack_id: request.stack_id.clone(),
            request_id: request.request_id.clone(),
            logical_resource_id: request.logical_resource_id.clone(),
            no_echo: false,
            data: SubnetPlan::new(),
        }
    }
}

/// PUT `response` to the pre-signed `url`.
///
/// The pre-signed URL is signed without a content type, so the header is sent empty.
pub async fn send_response(
    client: &reqwest::Client,
    url: &str,
    response: &CfnResponse,
) -> Result<(), Box<dyn Error>> {
    let body =
        serde_json::to_string(response).map_err(|e| format!("Error serializing response: {e}"))?;
    log::info!("Sending {:?} response for {}", response.status, response.logical_resource_id);
    log::debug!("Response body: {body}");

    let res = client
        .put(url)
        .header("content-type", "")
        .body(body)
        .send()
        .await
        .map_err(|e| format!("Failed to send response: {e}"))?;

    let status = res.status();
    log::info!("Status code: {status}");
    if !status.is_success() {
        return Err(format!("Response URL returned {status}").into());
    }
    Ok(())
}
