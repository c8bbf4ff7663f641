//! Property listing and search.

pub mod service;

pub use service::PropertyService;
