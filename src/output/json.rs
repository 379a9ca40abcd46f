//! JSON output, in the same shape as the custom resource `Data`.

use crate::models::SubnetPlan;
use std::error::Error;
use std::io::Write;

pub fn write_plan_json<W: Write>(out: &mut W, plan: &SubnetPlan) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer_pretty(&mut *out, plan)
        .map_err(|e| format!("Error serializing plan JSON: {e}"))?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ipv4;

    #[test]
    fn test_write_plan_json() {
        let mut plan = SubnetPlan::new();
        plan.insert("TGW", vec![Ipv4::new("10.113.0.240/28").unwrap()]);
        let mut out = Vec::new();
        write_plan_json(&mut out, &plan).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, serde_json::json!({"TGW": ["10.113.0.240/28"]}));
    }
}
