//! The filter state store.

use std::collections::BTreeSet;

use chrono::Datelike as _;
use house_insights_analytics::{date_bounds, distinct_zipcodes};
use house_insights_analytics_models::DateBounds;
use house_insights_property_models::PropertyRecord;

use crate::{DateRange, FilterSelection};

/// Owns the full dataset and the current [`FilterSelection`].
///
/// The filtered view is never cached; [`Self::filtered`] applies the
/// selection on each call.
#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    records: Vec<PropertyRecord>,
    selection: FilterSelection,
}

impl FilterStore {
    /// Publishes a freshly parsed dataset with the default (empty)
    /// selection.
    #[must_use]
    pub fn new(records: Vec<PropertyRecord>) -> Self {
        log::debug!("Filter store holding {} record(s)", records.len());
        Self {
            records,
            selection: FilterSelection::default(),
        }
    }

    /// The full, unfiltered dataset in file order.
    #[must_use]
    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    /// The current selection.
    #[must_use]
    pub const fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Records matching the current selection, in file order.
    pub fn filtered(&self) -> impl Iterator<Item = &PropertyRecord> + Clone + '_ {
        self.records.iter().filter(|r| self.selection.matches(r))
    }

    /// Number of records matching the current selection.
    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.filtered().count()
    }

    /// Replaces the date range.
    pub fn set_date_range(&mut self, range: DateRange) {
        log::debug!("Date range set to {range:?}");
        self.selection.date_range = range;
    }

    /// Replaces the zipcode selection. An empty selection keeps all
    /// zipcodes.
    pub fn set_zipcodes<I, S>(&mut self, zipcodes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.zipcodes = zipcodes.into_iter().map(Into::into).collect();
        log::debug!("Zipcode selection set to {:?}", self.selection.zipcodes);
    }

    /// Replaces the bedroom selection. An empty selection keeps all
    /// bedroom counts.
    pub fn set_bedrooms(&mut self, bedrooms: impl IntoIterator<Item = u32>) {
        self.selection.bedrooms = bedrooms.into_iter().collect();
        log::debug!("Bedroom selection set to {:?}", self.selection.bedrooms);
    }

    /// Clears every filter dimension.
    pub fn reset(&mut self) {
        log::debug!("Filters reset");
        self.selection = FilterSelection::default();
    }

    /// Distinct zipcodes across the full dataset, ascending.
    #[must_use]
    pub fn available_zipcodes(&self) -> Vec<String> {
        distinct_zipcodes(&self.records)
    }

    /// Sale-date bounds of the full dataset, `None` when it is empty.
    #[must_use]
    pub fn available_date_bounds(&self) -> Option<DateBounds> {
        date_bounds(&self.records)
    }

    /// Distinct sale years across the full dataset, ascending.
    #[must_use]
    pub fn available_years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.date().year())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
