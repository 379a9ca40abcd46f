//! CloudFormation custom resource requests.
//!
//! Requests arrive either directly or wrapped in an SNS notification whose
//! `Message` holds the request JSON as a string.

use crate::error::CalcError;
use crate::models::RawSubnetRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl FromStr for RequestType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Create" => Ok(RequestType::Create),
            "Update" => Ok(RequestType::Update),
            "Delete" => Ok(RequestType::Delete),
            _ => Err(CalcError::parse(s, "Unknown RequestType")),
        }
    }
}

/// Number of zones as CloudFormation hands it over: `"3"` or `3`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum AzsValue {
    Number(i64),
    Text(String),
}

impl AzsValue {
    pub fn to_azs(&self) -> Result<usize, CalcError> {
        let value = match self {
            AzsValue::Number(n) => *n,
            AzsValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| CalcError::parse(s.as_str(), "AZs is not an integer"))?,
        };
        usize::try_from(value)
            .map_err(|_| CalcError::parse(value.to_string(), "AZs can not be negative"))
    }
}

/// The properties set on the custom resource in the template.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceProperties {
    #[serde(rename = "VPCNetwork", default)]
    pub vpc_network: Option<String>,
    #[serde(rename = "AZs", default)]
    pub azs: Option<AzsValue>,
    #[serde(rename = "Subnets", default)]
    pub subnets: Vec<RawSubnetRequest>,
}

/// A custom resource request sent by CloudFormation.
///
/// Only the fields needed to send a response are checked when the event is
/// parsed. `RequestType` and `ResourceProperties` are decoded by
/// [`CfnRequest::kind`] and [`CfnRequest::properties`], so a bad value still
/// gets a FAILED response.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CfnRequest {
    pub request_type: String,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    #[serde(default)]
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub resource_properties: Value,
}

impl CfnRequest {
    pub fn kind(&self) -> Result<RequestType, CalcError> {
        self.request_type.parse()
    }

    /// The `VPCNetwork` property, if it is a string.
    pub fn vpc_network(&self) -> Option<&str> {
        self.resource_properties.get("VPCNetwork")?.as_str()
    }

    /// Decode the resource properties, naming the offending path on failure.
    pub fn properties(&self) -> Result<ResourceProperties, CalcError> {
        if self.resource_properties.is_null() {
            return Ok(ResourceProperties::default());
        }
        serde_path_to_error::deserialize(&self.resource_properties).map_err(|e| {
            CalcError::parse(
                "ResourceProperties",
                format!("path={} error={}", e.path(), e.inner()),
            )
        })
    }
}

#[derive(Deserialize, Debug)]
struct SnsEvent {
    #[serde(rename = "Records")]
    records: Vec<SnsRecord>,
}

#[derive(Deserialize, Debug)]
struct SnsRecord {
    #[serde(rename = "Sns")]
    sns: SnsMessage,
}

#[derive(Deserialize, Debug)]
struct SnsMessage {
    #[serde(rename = "Message")]
    message: String,
}

/// Parse an SNS notification or a bare custom resource request.
pub fn parse_event(json: &str) -> Result<CfnRequest, Box<dyn Error>> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| format!("Error parsing event JSON: {e}"))?;

    let message = if value.get("Records").is_some() {
        let sns: SnsEvent = serde_path_to_error::deserialize(value).map_err(|e| {
            format!("Error parsing SNS event: path={} error={}", e.path(), e)
        })?;
        let record = sns
            .records
            .into_iter()
            .next()
            .ok_or("SNS event has no Records")?;
        log::debug!("Unwrapped request from SNS record");
        record.sns.message
    } else {
        json.to_string()
    };

    let mut deserializer = serde_json::Deserializer::from_str(&message);
    let request: CfnRequest = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("MESSAGE START:\n\n{}\n\nMESSAGE END\n", message);
        format!("Error parsing CFN request: path={} error={}", e.path(), e)
    })?;
    Ok(request)
}

/// Read and parse an event from a JSON file.
pub fn read_event_file(path: &str) -> Result<CfnRequest, Box<dyn Error>> {
    if !Path::new(path).exists() {
        return Err(format!("Event file does not exist: {path}").into());
    }
    log::info!("Reading event file: {path}");
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading event file {path}: {e}"))?;
    parse_event(&json)
}
