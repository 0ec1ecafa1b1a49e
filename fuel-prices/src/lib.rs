//! Fuel price lookup.
//!
//! Geocodes an address, then lists nearby fuel stations with their current
//! prices. Upstream JSON is mapped into validated domain types; service
//! calls run on single-use workers that always deliver exactly one result.

pub mod adapter;
pub mod config;
pub mod context;
pub mod credentials;
pub mod domain;
pub mod messages;
pub mod services;
pub mod transport;
pub mod worker;
