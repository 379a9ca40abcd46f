//! Subnet sizing requests.

use super::ipv4::MAX_LENGTH;
use crate::error::CalcError;
use serde::{Deserialize, Serialize};

/// A prefix length as it arrives from a template: `"26"` or `26`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum PrefixValue {
    Number(i64),
    Text(String),
}

impl PrefixValue {
    /// Parse into a prefix length between 0 and 32.
    pub fn to_prefix(&self) -> Result<u8, CalcError> {
        let value = match self {
            PrefixValue::Number(n) => *n,
            PrefixValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| CalcError::parse(s.as_str(), "Prefix is not an integer"))?,
        };
        if !(0..=i64::from(MAX_LENGTH)).contains(&value) {
            return Err(CalcError::parse(
                value.to_string(),
                "Prefix must be between 0 and 32",
            ));
        }
        Ok(value as u8)
    }
}

/// A `{Label, Prefix}` entry exactly as it appears in the resource properties.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RawSubnetRequest {
    #[serde(rename = "Label")]
    pub label: String,
    #[serde(rename = "Prefix")]
    pub prefix: PrefixValue,
}

/// A validated request for one block per zone under `label`.
///
/// A `prefix` of 0 means no block is wanted for this label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubnetRequest {
    pub label: String,
    pub prefix: u8,
}

impl SubnetRequest {
    pub fn new(label: &str, prefix: u8) -> Result<SubnetRequest, CalcError> {
        if prefix > MAX_LENGTH {
            return Err(CalcError::parse(
                format!("{label}={prefix}"),
                "Prefix must be between 0 and 32",
            ));
        }
        Ok(SubnetRequest {
            label: label.to_string(),
            prefix,
        })
    }

    /// Parse the `LABEL=PREFIX` form used on the command line.
    pub fn parse_pair(pair: &str) -> Result<SubnetRequest, CalcError> {
        let (label, prefix) = pair
            .split_once('=')
            .ok_or_else(|| CalcError::parse(pair, "Expected LABEL=PREFIX"))?;
        let label = label.trim();
        if label.is_empty() {
            return Err(CalcError::parse(pair, "Label is empty"));
        }
        let prefix = PrefixValue::Text(prefix.to_string()).to_prefix()?;
        SubnetRequest::new(label, prefix)
    }

    /// True if no block should be allocated for this request.
    pub fn is_skipped(&self) -> bool {
        self.prefix == 0
    }
}

impl TryFrom<&RawSubnetRequest> for SubnetRequest {
    type Error = CalcError;

    fn try_from(raw: &RawSubnetRequest) -> Result<Self, Self::Error> {
        let prefix = raw.prefix.to_prefix()?;
        SubnetRequest::new(&raw.label, prefix)
    }
}

/// Validate a list of raw requests, keeping their order.
pub fn parse_requests(raw: &[RawSubnetRequest]) -> Result<Vec<SubnetRequest>, CalcError> {
    raw.iter().map(SubnetRequest::try_from).collect()
}
