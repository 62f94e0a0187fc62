//! Scalar metrics, the scatter-plot sample, and filter option lookups.

use std::collections::BTreeSet;

use house_insights_analytics_models::{
    DateBounds, PortfolioMetrics, PriceDistribution, PriceSamplePoint,
};
use house_insights_property_models::PropertyRecord;

use crate::{PriceAccumulator, mean};

/// Maximum number of points returned by [`price_vs_area_sample`].
pub const SAMPLE_CAP: usize = 500;

/// Totals and averages over the whole input.
///
/// The waterfront premium is
/// `(mean waterfront price - mean other price) / mean other price * 100`,
/// and is `0.0` when there are no waterfront sales or no other sales.
#[must_use]
pub fn portfolio_metrics<'a>(
    records: impl IntoIterator<Item = &'a PropertyRecord>,
) -> PortfolioMetrics {
    let mut all = PriceAccumulator::default();
    let mut waterfront = PriceAccumulator::default();
    let mut inland = PriceAccumulator::default();
    let mut total_sqft = 0.0;
    let mut total_price_per_sqft = 0.0;

    for record in records {
        all.add(record.price());
        total_sqft += record.sale().sqft_living;
        total_price_per_sqft += record.price_per_sqft();
        if record.sale().waterfront {
            waterfront.add(record.price());
        } else {
            inland.add(record.price());
        }
    }

    let waterfront_premium = if waterfront.count > 0 && inland.count > 0 && inland.mean() > 0.0 {
        (waterfront.mean() - inland.mean()) / inland.mean() * 100.0
    } else {
        0.0
    };

    PortfolioMetrics {
        total_properties: all.count,
        total_value: all.total,
        avg_price: all.mean(),
        avg_sqft: mean(total_sqft, all.count),
        avg_price_per_sqft: mean(total_price_per_sqft, all.count),
        waterfront_count: waterfront.count,
        waterfront_premium,
    }
}

/// The first [`SAMPLE_CAP`] records projected to scatter-plot points.
///
/// This is a positional prefix of the input, not a random sample.
#[must_use]
pub fn price_vs_area_sample<'a>(
    records: impl IntoIterator<Item = &'a PropertyRecord>,
) -> Vec<PriceSamplePoint> {
    price_vs_area_sample_with_cap(records, SAMPLE_CAP)
}

/// Like [`price_vs_area_sample`] with an explicit cap.
#[must_use]
pub fn price_vs_area_sample_with_cap<'a>(
    records: impl IntoIterator<Item = &'a PropertyRecord>,
    cap: usize,
) -> Vec<PriceSamplePoint> {
    records
        .into_iter()
        .take(cap)
        .map(|r| PriceSamplePoint {
            sqft: r.sale().sqft_living,
            price: r.price(),
            bedrooms: r.sale().bedrooms,
            waterfront: r.sale().waterfront,
        })
        .collect()
}

/// Distinct zipcodes in ascending string order.
#[must_use]
pub fn distinct_zipcodes<'a>(records: impl IntoIterator<Item = &'a PropertyRecord>) -> Vec<String> {
    records
        .into_iter()
        .map(PropertyRecord::zipcode)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Earliest and latest sale dates, or `None` for an empty input.
#[must_use]
pub fn date_bounds<'a>(records: impl IntoIterator<Item = &'a PropertyRecord>) -> Option<DateBounds> {
    records.into_iter().map(PropertyRecord::date).fold(None, |bounds, date| {
        Some(bounds.map_or(DateBounds { min: date, max: date }, |b: DateBounds| DateBounds {
            min: b.min.min(date),
            max: b.max.max(date),
        }))
    })
}

/// Price spread and attribute averages, or `None` for an empty input.
#[must_use]
pub fn price_distribution<'a>(
    records: impl IntoIterator<Item = &'a PropertyRecord>,
) -> Option<PriceDistribution> {
    let mut prices = Vec::new();
    let mut total_bedrooms = 0.0;
    let mut total_bathrooms = 0.0;
    let mut total_grade = 0.0;
    let mut waterfront_count = 0u64;

    for record in records {
        let sale = record.sale();
        prices.push(sale.price);
        total_bedrooms += f64::from(sale.bedrooms);
        total_bathrooms += sale.bathrooms;
        total_grade += f64::from(sale.grade);
        if sale.waterfront {
            waterfront_count += 1;
        }
    }

    if prices.is_empty() {
        return None;
    }

    prices.sort_by(f64::total_cmp);
    let count = prices.len() as u64;

    Some(PriceDistribution {
        median: prices[prices.len() / 2],
        min: prices[0],
        max: prices[prices.len() - 1],
        avg_bedrooms: mean(total_bedrooms, count),
        avg_bathrooms: mean(total_bathrooms, count),
        avg_grade: mean(total_grade, count),
        waterfront_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{SaleBuilder, approx_eq};
    use chrono::NaiveDate;

    #[test]
    fn waterfront_premium_fixture() {
        let records = vec![
            SaleBuilder::new("w1", 800_000.0).waterfront(true).build(),
            SaleBuilder::new("w2", 1_000_000.0).waterfront(true).build(),
            SaleBuilder::new("n1", 400_000.0).build(),
            SaleBuilder::new("n2", 600_000.0).build(),
        ];
        let metrics = portfolio_metrics(&records);
        assert_eq!(metrics.total_properties, 4);
        assert_eq!(metrics.waterfront_count, 2);
        assert!(approx_eq(metrics.total_value, 2_800_000.0));
        assert!(approx_eq(metrics.avg_price, 700_000.0));
        assert!(approx_eq(metrics.waterfront_premium, 80.0));
    }

    #[test]
    fn premium_is_zero_without_waterfront_sales() {
        let records = vec![
            SaleBuilder::new("n1", 400_000.0).build(),
            SaleBuilder::new("n2", 600_000.0).build(),
        ];
        let metrics = portfolio_metrics(&records);
        assert!(metrics.waterfront_premium.abs() < f64::EPSILON);
    }

    #[test]
    fn premium_is_zero_with_only_waterfront_sales() {
        let records = vec![SaleBuilder::new("w1", 900_000.0).waterfront(true).build()];
        let metrics = portfolio_metrics(&records);
        assert!(!metrics.waterfront_premium.is_nan());
        assert!(metrics.waterfront_premium.abs() < f64::EPSILON);
    }

    #[test]
    fn averages_area_and_price_per_sqft() {
        let records = vec![
            SaleBuilder::new("1", 300_000.0).sqft(1000.0).build(),
            SaleBuilder::new("2", 600_000.0).sqft(3000.0).build(),
            SaleBuilder::new("3", 150_000.0).sqft(0.0).build(),
        ];
        let metrics = portfolio_metrics(&records);
        assert!(approx_eq(metrics.avg_sqft, 4000.0 / 3.0));
        // 300 + 200 + 0 (zero area counts as zero)
        assert!(approx_eq(metrics.avg_price_per_sqft, 500.0 / 3.0));
    }

    #[test]
    fn empty_metrics_are_zero() {
        let metrics = portfolio_metrics(&[]);
        assert_eq!(metrics, PortfolioMetrics::default());
        assert!(!metrics.avg_price.is_nan());
    }

    #[test]
    fn sample_is_positional_prefix() {
        let records: Vec<PropertyRecord> = (0..750)
            .map(|i| SaleBuilder::new(&i.to_string(), 100_000.0 + f64::from(i)).build())
            .collect();

        let sample = price_vs_area_sample(&records);
        assert_eq!(sample.len(), SAMPLE_CAP);
        for (point, record) in sample.iter().zip(&records) {
            assert!(approx_eq(point.price, record.price()));
        }

        let short = price_vs_area_sample(&records[..20]);
        assert_eq!(short.len(), 20);
        assert!(approx_eq(short[19].price, 100_019.0));

        assert_eq!(price_vs_area_sample_with_cap(&records, 3).len(), 3);
        assert!(price_vs_area_sample(&[]).is_empty());
    }

    #[test]
    fn sample_projects_fields() {
        let records = vec![
            SaleBuilder::new("1", 750_000.0)
                .sqft(2400.0)
                .bedrooms(4)
                .waterfront(true)
                .build(),
        ];
        let point = &price_vs_area_sample(&records)[0];
        assert!(approx_eq(point.sqft, 2400.0));
        assert_eq!(point.bedrooms, 4);
        assert!(point.waterfront);
    }

    #[test]
    fn distinct_zipcodes_sorted() {
        let records = vec![
            SaleBuilder::new("1", 1.0).zipcode("98103").build(),
            SaleBuilder::new("2", 1.0).zipcode("02134").build(),
            SaleBuilder::new("3", 1.0).zipcode("98103").build(),
            SaleBuilder::new("4", 1.0).zipcode("98001").build(),
        ];
        assert_eq!(distinct_zipcodes(&records), ["02134", "98001", "98103"]);
        assert!(distinct_zipcodes(&[]).is_empty());
    }

    #[test]
    fn date_bounds_min_max() {
        let records = vec![
            SaleBuilder::new("1", 1.0).date(2014, 10, 13).build(),
            SaleBuilder::new("2", 1.0).date(2015, 5, 27).build(),
            SaleBuilder::new("3", 1.0).date(2014, 5, 2).build(),
        ];
        let bounds = date_bounds(&records).unwrap();
        assert_eq!(bounds.min, NaiveDate::from_ymd_opt(2014, 5, 2).unwrap());
        assert_eq!(bounds.max, NaiveDate::from_ymd_opt(2015, 5, 27).unwrap());
        assert!(date_bounds(&[]).is_none());
    }

    #[test]
    fn price_distribution_uses_upper_median() {
        let records = vec![
            SaleBuilder::new("1", 400_000.0).bedrooms(2).bathrooms(1.0).grade(6).build(),
            SaleBuilder::new("2", 100_000.0).bedrooms(3).bathrooms(2.5).grade(7).build(),
            SaleBuilder::new("3", 300_000.0).bedrooms(4).bathrooms(2.0).grade(8).waterfront(true).build(),
            SaleBuilder::new("4", 200_000.0).bedrooms(3).bathrooms(1.5).grade(7).build(),
        ];
        let stats = price_distribution(&records).unwrap();
        assert!(approx_eq(stats.median, 300_000.0));
        assert!(approx_eq(stats.min, 100_000.0));
        assert!(approx_eq(stats.max, 400_000.0));
        assert!(approx_eq(stats.avg_bedrooms, 3.0));
        assert!(approx_eq(stats.avg_bathrooms, 1.75));
        assert!(approx_eq(stats.avg_grade, 7.0));
        assert_eq!(stats.waterfront_count, 1);

        assert!(price_distribution(&[]).is_none());
    }
}
