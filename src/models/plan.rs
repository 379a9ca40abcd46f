//! The result of a subnet calculation.

use super::Ipv4;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Label to blocks mapping that keeps labels in the order they were planned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubnetPlan {
    entries: Vec<(String, Vec<Ipv4>)>,
}

impl SubnetPlan {
    pub fn new() -> SubnetPlan {
        SubnetPlan {
            entries: Vec::new(),
        }
    }

    /// Record `blocks` under `label`, replacing an earlier entry in place.
    pub fn insert(&mut self, label: &str, blocks: Vec<Ipv4>) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, existing)) => *existing = blocks,
            None => self.entries.push((label.to_string(), blocks)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&[Ipv4]> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, blocks)| blocks.as_slice())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Ipv4])> {
        self.entries
            .iter()
            .map(|(l, blocks)| (l.as_str(), blocks.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every block in the plan, tagged with its label.
    pub fn blocks(&self) -> impl Iterator<Item = (&str, Ipv4)> {
        self.entries
            .iter()
            .flat_map(|(l, blocks)| blocks.iter().map(move |b| (l.as_str(), *b)))
    }

    /// The plan as label and CIDR text pairs, in plan order.
    pub fn to_cidr_strings(&self) -> Vec<(String, Vec<String>)> {
        self.entries
            .iter()
            .map(|(l, blocks)| (l.clone(), blocks.iter().map(|b| b.to_string()).collect()))
            .collect()
    }
}

impl Serialize for SubnetPlan {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, blocks) in &self.entries {
            map.serialize_entry(label, blocks)?;
        }
        map.end()
    }
}

impl fmt::Display for SubnetPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, blocks) in &self.entries {
            let cidrs: Vec<String> = blocks.iter().map(|b| b.to_string()).collect();
            writeln!(f, "{label}: [{}]", cidrs.join(", "))?;
        }
        Ok(())
    }
}
