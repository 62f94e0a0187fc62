#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter state for the home sales dashboard.
//!
//! [`FilterStore`] owns the full parsed dataset and the current
//! [`FilterSelection`]. The filtered view is recomputed from those two on
//! every read, so it can never go stale. The only way to change the
//! selection is through the store's setters.

pub mod selection;
pub mod store;

pub use selection::{DateRange, FilterSelection};
pub use store::FilterStore;
