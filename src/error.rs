//! Error types for subnet calculation.

use thiserror::Error;

/// Errors raised while planning subnets.
///
/// `Parse` and `InvalidRequest` are raised before any allocation happens.
/// `NoSpace` aborts the whole plan, no partial result is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("Invalid input '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("No more space in given network for {request}: {reason}")]
    NoSpace { request: String, reason: String },

    #[error("Network {block} can not be split any further")]
    SizeLimit { block: String },

    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },
}

impl CalcError {
    pub(crate) fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn no_space(request: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::NoSpace {
            request: request.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let error = CalcError::parse("10.0.0.0/33", "Network length is too long");
        assert_eq!(
            error.to_string(),
            "Invalid input '10.0.0.0/33': Network length is too long"
        );
    }

    #[test]
    fn test_no_space_error_message() {
        let error = CalcError::no_space("Private1", "zone 3 of 3 needs a /25");
        assert_eq!(
            error.to_string(),
            "No more space in given network for Private1: zone 3 of 3 needs a /25"
        );
    }
}
