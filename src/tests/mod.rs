//! Test suite for the block engine
//!
//! This module organizes tests into logical groups: block creation,
//! discovery and switching scenarios, and property-based invariants.

#[cfg(test)]
mod discovery_tests;
