//! Route handlers organized by domain.

pub mod booking;
pub mod catalog;
pub mod health;
pub mod partner;
pub mod property;
pub mod quote;
