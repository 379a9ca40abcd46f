//! CSV output formatting for a subnet plan.

use crate::models::{Ipv4, SubnetPlan};
use crate::processing::{plan_rows, PlanRow};
use colored::Colorize;
use std::error::Error;
use std::io::Write;

use super::terminal::format_field;

const HEADER: &str =
    r#" "cnt",            "label",  "az",       "subnet_cidr",         "broadcast",   "hosts""#;

/// Print a plan as CSV to stdout.
///
/// # Arguments
/// * `vpc` - The network the plan was made for
/// * `plan` - The plan to print
/// * `show_gaps` - Add `-gap-` rows for unused space
pub fn plan_print(vpc: &Ipv4, plan: &SubnetPlan, show_gaps: bool) -> Result<(), Box<dyn Error>> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_plan_csv(&mut out, vpc, plan, show_gaps)?;
    Ok(())
}

/// Write a plan as CSV, one row per block in address order.
pub fn write_plan_csv<W: Write>(
    out: &mut W,
    vpc: &Ipv4,
    plan: &SubnetPlan,
    show_gaps: bool,
) -> Result<(), Box<dyn Error>> {
    log::info!("#Start write_plan_csv() vpc={vpc} labels={}", plan.len());

    let rows = plan_rows(vpc, plan, show_gaps)?;
    writeln!(out, "{HEADER}")?;
    for row in &rows {
        writeln!(out, "{}", csv_row(row))?;
    }

    let gap_count = rows.iter().filter(|r| r.is_gap()).count();
    if gap_count > 0 {
        log::info!("{} unused {} in {vpc}", gap_count, "gap(s)".on_red());
    }
    Ok(())
}

/// Format a single CSV row.
fn csv_row(row: &PlanRow) -> String {
    format!(
        "{j},{label},{az},{subnet_cidr},{broadcast},{hosts}",
        j = format_field(row.j, 6),
        label = format_field(&row.label, 18),
        az = format_field(row.az, 6),
        subnet_cidr = format_field(&row.subnet_cidr, 19),
        broadcast = format_field(format!("{}_br", row.broadcast), 19),
        hosts = format_field(row.usable_hosts, 8),
    )
}
