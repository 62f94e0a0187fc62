#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation engine for the home sales dashboard.
//!
//! Every public function takes an already-filtered sequence of
//! [`PropertyRecord`](house_insights_property_models::PropertyRecord)
//! references and returns a freshly built summary. The functions are pure
//! and deterministic and never fail: an empty input produces zeroed or empty
//! results instead of `NaN` or an error.
//!
//! Inputs are accepted as `IntoIterator<Item = &PropertyRecord>` so callers
//! can pass a `&[PropertyRecord]` or the lazily filtered iterator from the
//! filter store without collecting first.

pub mod grouping;
pub mod metrics;
pub mod table;

#[cfg(test)]
pub(crate) mod fixtures;

pub use grouping::{
    ZipcodeGroups, group_by_bedrooms, group_by_condition, group_by_grade, group_by_month,
    group_by_price_category, group_by_zipcode,
};
pub use metrics::{
    SAMPLE_CAP, date_bounds, distinct_zipcodes, portfolio_metrics, price_distribution,
    price_vs_area_sample, price_vs_area_sample_with_cap,
};
pub use table::{paginate, search_records};

/// Running count and price sum for one group.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PriceAccumulator {
    pub count: u64,
    pub total: f64,
}

impl PriceAccumulator {
    pub fn add(&mut self, price: f64) {
        self.count += 1;
        self.total += price;
    }

    /// Mean price, `0.0` for an empty group.
    pub fn mean(&self) -> f64 {
        mean(self.total, self.count)
    }
}

/// `total / count`, or `0.0` when `count` is zero.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean(total: f64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
