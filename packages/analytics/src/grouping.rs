//! Grouped summaries feeding the dashboard charts.
//!
//! Every grouping partitions its input: the counts across the returned
//! groups always sum to the number of input records. Groups keyed by a
//! number or by a `YYYY-MM` string are ordered ascending by key; zipcode
//! groups are the exception and default to descending mean price.

use std::collections::BTreeMap;

use house_insights_analytics_models::{
    BedroomGroup, ConditionGroup, GradeGroup, MonthGroup, PriceCategoryGroup, ZipcodeGroup,
};
use house_insights_property_models::{PriceCategory, PropertyRecord, condition_label};
use serde::Serialize;

use crate::{PriceAccumulator, mean};

/// Groups by a key, accumulating count and price per group in key order.
fn accumulate_by<'a, K: Ord>(
    records: impl IntoIterator<Item = &'a PropertyRecord>,
    key: impl Fn(&PropertyRecord) -> K,
) -> BTreeMap<K, PriceAccumulator> {
    let mut groups: BTreeMap<K, PriceAccumulator> = BTreeMap::new();
    for record in records {
        groups.entry(key(record)).or_default().add(record.price());
    }
    groups
}

/// Count and mean price per bedroom count, ascending by bedroom count.
///
/// Every observed count is returned, including `0` and outliers; limiting
/// the display range is up to the caller.
#[must_use]
pub fn group_by_bedrooms<'a>(
    records: impl IntoIterator<Item = &'a PropertyRecord>,
) -> Vec<BedroomGroup> {
    accumulate_by(records, |r| r.sale().bedrooms)
        .into_iter()
        .map(|(bedrooms, acc)| BedroomGroup {
            bedrooms,
            count: acc.count,
            avg_price: acc.mean(),
        })
        .collect()
}

/// Count and share of sales per price band.
///
/// Always returns all four bands in the order Budget, Mid-Range, Premium,
/// Luxury. Empty bands (and every band, for an empty input) have a count
/// and percentage of zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn group_by_price_category<'a>(
    records: impl IntoIterator<Item = &'a PropertyRecord>,
) -> Vec<PriceCategoryGroup> {
    let mut counts: BTreeMap<PriceCategory, u64> = BTreeMap::new();
    let mut total = 0u64;
    for record in records {
        *counts.entry(record.price_category()).or_default() += 1;
        total += 1;
    }

    PriceCategory::all()
        .iter()
        .map(|&category| {
            let count = counts.get(&category).copied().unwrap_or_default();
            PriceCategoryGroup {
                category,
                count,
                percentage: mean(count as f64 * 100.0, total),
            }
        })
        .collect()
}

/// Count and mean price per condition score, ascending by score, with a
/// display label per level.
#[must_use]
pub fn group_by_condition<'a>(
    records: impl IntoIterator<Item = &'a PropertyRecord>,
) -> Vec<ConditionGroup> {
    accumulate_by(records, |r| r.sale().condition)
        .into_iter()
        .map(|(condition, acc)| ConditionGroup {
            condition,
            label: condition_label(condition),
            count: acc.count,
            avg_price: acc.mean(),
        })
        .collect()
}

/// Count and mean price per construction grade, ascending by grade.
#[must_use]
pub fn group_by_grade<'a>(records: impl IntoIterator<Item = &'a PropertyRecord>) -> Vec<GradeGroup> {
    accumulate_by(records, |r| r.sale().grade)
        .into_iter()
        .map(|(grade, acc)| GradeGroup {
            grade,
            count: acc.count,
            avg_price: acc.mean(),
        })
        .collect()
}

/// Count, mean price and total value per sale month.
///
/// Keys are zero-padded `YYYY-MM` strings, so the lexicographic order
/// returned here is also chronological across year boundaries.
#[must_use]
pub fn group_by_month<'a>(records: impl IntoIterator<Item = &'a PropertyRecord>) -> Vec<MonthGroup> {
    accumulate_by(records, PropertyRecord::month_key)
        .into_iter()
        .map(|(month, acc)| MonthGroup {
            month,
            count: acc.count,
            avg_price: acc.mean(),
            total_value: acc.total,
        })
        .collect()
}

/// Zipcode summaries supporting both the by-price and by-volume views.
///
/// Built once by [`group_by_zipcode`]; the two orderings are derived from
/// the same groups without regrouping.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ZipcodeGroups {
    /// Descending by mean price, ties ascending by zipcode.
    groups: Vec<ZipcodeGroup>,
}

impl ZipcodeGroups {
    /// Groups ordered by descending mean price (the default view).
    #[must_use]
    pub fn by_price(&self) -> &[ZipcodeGroup] {
        &self.groups
    }

    /// Groups ordered by descending sale count.
    ///
    /// Zipcodes with equal counts keep their by-price order.
    #[must_use]
    pub fn by_volume(&self) -> Vec<&ZipcodeGroup> {
        let mut groups: Vec<&ZipcodeGroup> = self.groups.iter().collect();
        groups.sort_by(|a, b| b.count.cmp(&a.count));
        groups
    }

    /// The `n` most expensive zipcodes by mean price.
    #[must_use]
    pub fn top_by_price(&self, n: usize) -> &[ZipcodeGroup] {
        &self.groups[..n.min(self.groups.len())]
    }

    /// The `n` zipcodes with the most sales.
    #[must_use]
    pub fn top_by_volume(&self, n: usize) -> Vec<&ZipcodeGroup> {
        let mut groups = self.by_volume();
        groups.truncate(n);
        groups
    }

    /// Looks up a single zipcode.
    #[must_use]
    pub fn get(&self, zipcode: &str) -> Option<&ZipcodeGroup> {
        self.groups.iter().find(|g| g.zipcode == zipcode)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[derive(Default)]
struct ZipcodeAccumulator {
    price: PriceAccumulator,
    total_lat: f64,
    total_long: f64,
}

/// Count, mean and total price, and location centroid per zipcode.
///
/// Zipcodes are grouped by their exact string, never as numbers.
#[must_use]
pub fn group_by_zipcode<'a>(
    records: impl IntoIterator<Item = &'a PropertyRecord>,
) -> ZipcodeGroups {
    let mut acc: BTreeMap<&'a str, ZipcodeAccumulator> = BTreeMap::new();
    for record in records {
        let entry = acc.entry(record.zipcode()).or_default();
        entry.price.add(record.price());
        entry.total_lat += record.sale().lat;
        entry.total_long += record.sale().long;
    }

    let mut groups: Vec<ZipcodeGroup> = acc
        .into_iter()
        .map(|(zipcode, z)| ZipcodeGroup {
            zipcode: zipcode.to_string(),
            count: z.price.count,
            avg_price: z.price.mean(),
            total_value: z.price.total,
            lat: mean(z.total_lat, z.price.count),
            long: mean(z.total_long, z.price.count),
        })
        .collect();

    groups.sort_by(|a, b| {
        b.avg_price
            .total_cmp(&a.avg_price)
            .then_with(|| a.zipcode.cmp(&b.zipcode))
    });

    log::debug!("Grouped sales into {} zipcode(s)", groups.len());

    ZipcodeGroups { groups }
}
