#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation result types.
//!
//! Every grouping returns an ordered `Vec` of one of the `*Group` types
//! below. Results are built fresh on each call and are never mutated
//! afterwards; their ordering is part of the contract documented on each
//! aggregation function.

use chrono::NaiveDate;
use house_insights_property_models::PriceCategory;
use serde::{Deserialize, Serialize};

/// Sales grouped by bedroom count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedroomGroup {
    /// Bedroom count.
    pub bedrooms: u32,
    /// Number of sales.
    pub count: u64,
    /// Mean sale price.
    pub avg_price: f64,
}

/// Share of sales in one price band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceCategoryGroup {
    /// Price band.
    pub category: PriceCategory,
    /// Number of sales.
    pub count: u64,
    /// Share of all input sales, 0-100.
    pub percentage: f64,
}

/// Sales grouped by condition score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionGroup {
    /// Condition score.
    pub condition: u8,
    /// Display label (e.g. "Average", or "Condition 7" off-scale).
    pub label: String,
    /// Number of sales.
    pub count: u64,
    /// Mean sale price.
    pub avg_price: f64,
}

/// Sales grouped by construction grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeGroup {
    /// Construction grade.
    pub grade: u8,
    /// Number of sales.
    pub count: u64,
    /// Mean sale price.
    pub avg_price: f64,
}

/// Sales grouped by calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGroup {
    /// Zero-padded `YYYY-MM` key, month 1-12.
    pub month: String,
    /// Number of sales.
    pub count: u64,
    /// Mean sale price.
    pub avg_price: f64,
    /// Sum of sale prices.
    pub total_value: f64,
}

/// Sales grouped by zipcode, with the centroid of the group's locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZipcodeGroup {
    /// Zipcode string as it appeared in the dataset.
    pub zipcode: String,
    /// Number of sales.
    pub count: u64,
    /// Mean sale price.
    pub avg_price: f64,
    /// Sum of sale prices.
    pub total_value: f64,
    /// Mean latitude of member sales.
    pub lat: f64,
    /// Mean longitude of member sales.
    pub long: f64,
}

/// Scalar metrics over a whole record sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
    /// Number of sales.
    pub total_properties: u64,
    /// Sum of sale prices.
    pub total_value: f64,
    /// Mean sale price.
    pub avg_price: f64,
    /// Mean living area in square feet.
    pub avg_sqft: f64,
    /// Mean of per-record price per square foot.
    pub avg_price_per_sqft: f64,
    /// Number of waterfront sales.
    pub waterfront_count: u64,
    /// Percentage by which the mean waterfront price exceeds the mean
    /// non-waterfront price. `0.0` when either side is empty.
    pub waterfront_premium: f64,
}

/// One point of the price-vs-area scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSamplePoint {
    /// Living area in square feet.
    pub sqft: f64,
    /// Sale price.
    pub price: f64,
    /// Bedroom count.
    pub bedrooms: u32,
    /// Waterfront flag.
    pub waterfront: bool,
}

/// Earliest and latest sale dates in a record sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateBounds {
    /// Earliest sale date.
    pub min: NaiveDate,
    /// Latest sale date.
    pub max: NaiveDate,
}

/// Price spread and averages shown next to the property table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDistribution {
    /// Upper median (element `n / 2` of the ascending prices).
    pub median: f64,
    /// Lowest sale price.
    pub min: f64,
    /// Highest sale price.
    pub max: f64,
    /// Mean bedroom count.
    pub avg_bedrooms: f64,
    /// Mean bathroom count.
    pub avg_bathrooms: f64,
    /// Mean construction grade.
    pub avg_grade: f64,
    /// Number of waterfront sales.
    pub waterfront_count: u64,
}

/// One page of the property table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage<T> {
    /// Rows on this page.
    pub items: Vec<T>,
    /// 1-based page number after clamping.
    pub page: usize,
    /// Total number of pages (`0` when there are no rows).
    pub total_pages: usize,
    /// Total rows across all pages.
    pub total_items: usize,
    /// 1-based index of the first row on this page (`0` when empty).
    pub first_row: usize,
    /// 1-based index of the last row on this page (`0` when empty).
    pub last_row: usize,
}
