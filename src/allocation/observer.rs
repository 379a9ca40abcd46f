//! Trace hooks for the allocator.
//!
//! The calculator reports what it does through an [`AllocationObserver`]
//! instead of logging, so callers choose where the trace goes.

use super::pool::FreeRun;
use crate::models::Ipv4;

/// Something the calculator did or saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationEvent<'a> {
    /// Free space before an allocation attempt.
    FreeSpace { free: &'a [FreeRun] },
    /// A block was handed to one zone of a request.
    Allocated {
        label: &'a str,
        zone: usize,
        block: Ipv4,
    },
    /// A request asked for prefix 0 and was left out.
    Skipped { label: &'a str },
    /// The tail reservation was postponed until every other request is placed.
    Deferred { label: &'a str },
    /// The tail reservation fits in the remaining free space.
    TailReserved { label: &'a str, blocks: &'a [Ipv4] },
}

pub trait AllocationObserver {
    fn on_event(&mut self, event: &AllocationEvent<'_>);
}

impl<F> AllocationObserver for F
where
    F: FnMut(&AllocationEvent<'_>),
{
    fn on_event(&mut self, event: &AllocationEvent<'_>) {
        self(event)
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl AllocationObserver for NoopObserver {
    fn on_event(&mut self, _event: &AllocationEvent<'_>) {}
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl AllocationObserver for LogObserver {
    fn on_event(&mut self, event: &AllocationEvent<'_>) {
        match event {
            AllocationEvent::FreeSpace { free } => {
                log::trace!(
                    "Available space is [{}]",
                    free.iter()
                        .map(|b| b.to_string())
                        .collect::<Vec<String>>()
                        .join(", ")
                );
            }
            AllocationEvent::Allocated { label, zone, block } => {
                log::debug!("Adding {block} to {label} zone {zone}");
            }
            AllocationEvent::Skipped { label } => {
                log::debug!("Skipping {label}, prefix is 0");
            }
            AllocationEvent::Deferred { label } => {
                log::debug!("Deferring tail reservation {label} until the end");
            }
            AllocationEvent::TailReserved { label, blocks } => {
                log::info!(
                    "Reserved {label} at the end of the network: {}",
                    blocks
                        .iter()
                        .map(|b| b.to_string())
                        .collect::<Vec<String>>()
                        .join(", ")
                );
            }
        }
    }
}
