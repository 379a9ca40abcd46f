//! Output formatting for subnet plans.
//!
//! This module handles formatting and outputting plans:
//! - [`csv`] - CSV output formatting
//! - [`json`] - JSON mapping of label to CIDRs
//! - [`terminal`] - Terminal helpers with colors

mod csv;
mod json;
mod terminal;

pub use csv::{plan_print, write_plan_csv};
pub use json::write_plan_json;
pub use terminal::{format_field, plan_summary};
