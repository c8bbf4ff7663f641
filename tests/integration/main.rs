//! Router-level integration tests over in-memory stores.

mod booking_test;
mod helpers;
mod listing_test;
mod partner_test;
