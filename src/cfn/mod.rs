//! CloudFormation custom resource glue.
//!
//! This module handles everything around the calculation itself:
//! - [`event`] - Parsing SNS-wrapped or direct custom resource requests
//! - [`handler`] - Dispatching Create, Update and Delete requests
//! - [`response`] - Building and sending the response

mod event;
mod handler;
mod response;

// Re-export public types and functions
pub use event::{parse_event, read_event_file, AzsValue, CfnRequest, RequestType, ResourceProperties};
pub use handler::{handle_request, physical_resource_id};
pub use response::{send_response, CfnResponse, ResponseStatus, DEFAULT_REASON};
