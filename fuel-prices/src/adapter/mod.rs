//! Response adapters: raw JSON records to validated domain values.
//!
//! Records are read through a field-presence view ([`Fields`]) rather than
//! deserialized straight into structs, so that "absent" and "zero" stay
//! distinguishable. Adapters are read-only; nothing is written back.

mod address;
mod batch;
mod error;
mod fields;
mod geo;
mod station;

pub use address::parse_address;
pub use batch::{Batch, BatchPolicy, map_batch};
pub use error::{BatchAborted, MalformedResponse};
pub use fields::{Fields, Required};
pub use geo::parse_geo;
pub use station::{PriceLayout, parse_station};
