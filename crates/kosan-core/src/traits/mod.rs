//! Core traits defined in `kosan-core` and implemented by other crates.

pub mod availability;

pub use availability::AvailabilityOracle;
