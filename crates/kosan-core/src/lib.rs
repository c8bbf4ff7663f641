//! # kosan-core
//!
//! Core crate for the Kosan booking backend. Contains the unified error
//! system, configuration schemas, typed identifiers, money and pagination
//! types, and the traits for collaborators that live outside this process.
//!
//! This crate has **no** internal dependencies on other Kosan crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
