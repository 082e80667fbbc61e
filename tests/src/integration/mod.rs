//! # Integration Tests
//!
//! Flows that cross subsystem boundaries, run against an in-memory node.

pub mod ledger;

#[cfg(test)]
mod flows;
#[cfg(test)]
mod vectors;
