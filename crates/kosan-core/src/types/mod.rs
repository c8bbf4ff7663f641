//! Core type definitions used across the Kosan workspace.

pub mod id;
pub mod money;
pub mod pagination;

pub use id::*;
pub use money::Rupiah;
pub use pagination::{PageRequest, PageResponse};
