//! Filter dimensions and the record predicate they define.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use house_insights_property_models::PropertyRecord;
use serde::{Deserialize, Serialize};

/// Inclusive sale-date range. An unset bound is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// Earliest sale date to keep.
    pub start: Option<NaiveDate>,
    /// Latest sale date to keep.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// A range with both bounds set.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// January 1st through December 31st of `year`.
    ///
    /// Returns `None` if `year` is outside chrono's supported range.
    #[must_use]
    pub fn year(year: i32) -> Option<Self> {
        Some(Self::new(
            NaiveDate::from_ymd_opt(year, 1, 1)?,
            NaiveDate::from_ymd_opt(year, 12, 31)?,
        ))
    }

    /// Whether neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether `date` falls inside the range (bounds inclusive).
    ///
    /// A range whose start is after its end contains nothing.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// The current filter selection.
///
/// Dimensions combine with logical AND. An empty zipcode or bedroom set
/// means "do not filter on this dimension", not "keep nothing".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    /// Sale-date range.
    pub date_range: DateRange,
    /// Zipcodes to keep; empty keeps all.
    pub zipcodes: BTreeSet<String>,
    /// Bedroom counts to keep; empty keeps all.
    pub bedrooms: BTreeSet<u32>,
}

impl FilterSelection {
    /// Whether no dimension is active.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.date_range.is_unbounded() && self.zipcodes.is_empty() && self.bedrooms.is_empty()
    }

    /// Whether `record` satisfies every active dimension.
    #[must_use]
    pub fn matches(&self, record: &PropertyRecord) -> bool {
        self.date_range.contains(record.date())
            && (self.zipcodes.is_empty() || self.zipcodes.contains(record.zipcode()))
            && (self.bedrooms.is_empty() || self.bedrooms.contains(&record.sale().bedrooms))
    }
}
