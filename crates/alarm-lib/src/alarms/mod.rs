//! Alarm definitions and provisioning
//!
//! [`catalog`] builds the fixed alarm definitions for volumes and file
//! systems; [`AlarmProvisioner`] sends them one by one, isolating failures
//! per alarm.

pub mod catalog;
mod provisioner;


pub use provisioner::{AlarmBatch, AlarmOutcome, AlarmProvisioner};
