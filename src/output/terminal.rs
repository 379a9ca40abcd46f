//! Terminal output utilities.

use crate::models::SubnetPlan;
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

/// One line per label: block count, addresses covered and the CIDRs.
pub fn plan_summary(plan: &SubnetPlan, tail_label: Option<&str>) -> Vec<String> {
    plan.iter()
        .map(|(label, blocks)| {
            let addresses: u64 = blocks.iter().map(|b| b.size()).sum();
            let cidrs = blocks
                .iter()
                .map(|b| b.to_string())
                .collect::<Vec<String>>()
                .join(", ");
            let label = if Some(label) == tail_label {
                label.on_blue().to_string()
            } else {
                label.bold().to_string()
            };
            format!("{label}: {} blocks, {addresses} addresses [{cidrs}]", blocks.len())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ipv4;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("TGW", 10), "     \"TGW\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("10.113.0.0/26", 5), "\"10.113.0.0/26\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(251, 6), " \"251\"");
    }

    #[test]
    fn test_plan_summary() {
        colored::control::set_override(false);
        let mut plan = SubnetPlan::new();
        plan.insert(
            "Public",
            vec![
                Ipv4::new("10.0.0.0/26").unwrap(),
                Ipv4::new("10.0.0.64/26").unwrap(),
            ],
        );
        let lines = plan_summary(&plan, Some("TGW"));
        assert_eq!(
            lines,
            vec!["Public: 2 blocks, 128 addresses [10.0.0.0/26, 10.0.0.64/26]"]
        );
    }
}
