//! Number formatting for dashboard columns and KPI cards.
//!
//! Each column picks its [`MetricKind`] once; every value in that column is
//! then formatted the same way.

/// How a numeric value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Whole number with thousands separators (`21,613`).
    Count,
    /// Full dollar amount (`$540,088`).
    Price,
    /// Short dollar amount for cards (`$1.2M`, `$450K`).
    CompactPrice,
    /// Short dollar amount for large totals (`$11.67B`, `$450M`, `$450K`).
    MarketValue,
    /// Percentage with one decimal (`33.3%`).
    Percent,
    /// Signed whole percentage (`+80%`).
    Premium,
    /// Dollars per square foot (`$264/sqft`).
    PricePerSqft,
    /// Area with thousands separators (`2,080 sqft`).
    Area,
    /// One decimal place (`3.4`).
    Decimal,
    /// Coordinate with four decimals (`47.5601`).
    Coordinate,
}

impl MetricKind {
    /// Formats `value` for display.
    #[must_use]
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Count => group_thousands(round(value)),
            Self::Price => format!("${}", group_thousands(round(value))),
            Self::CompactPrice => {
                if value >= 1_000_000.0 {
                    format!("${:.1}M", value / 1_000_000.0)
                } else {
                    format!("${:.0}K", value / 1_000.0)
                }
            }
            Self::MarketValue => {
                if value >= 1_000_000_000.0 {
                    format!("${:.2}B", value / 1_000_000_000.0)
                } else if value >= 1_000_000.0 {
                    format!("${:.0}M", value / 1_000_000.0)
                } else {
                    format!("${:.0}K", value / 1_000.0)
                }
            }
            Self::Percent => format!("{value:.1}%"),
            Self::Premium => format!("{value:+.0}%"),
            Self::PricePerSqft => format!("${}/sqft", group_thousands(round(value))),
            Self::Area => format!("{} sqft", group_thousands(round(value))),
            Self::Decimal => format!("{value:.1}"),
            Self::Coordinate => format!("{value:.4}"),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round(value: f64) -> i64 {
    value.round() as i64
}

/// Inserts `,` between groups of three digits.
#[must_use]
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(21_613), "21,613");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-45_000), "-45,000");
    }

    #[test]
    fn formats_prices() {
        assert_eq!(MetricKind::Price.format(540_088.14), "$540,088");
        assert_eq!(MetricKind::CompactPrice.format(1_225_000.0), "$1.2M");
        assert_eq!(MetricKind::CompactPrice.format(450_000.0), "$450K");
        assert_eq!(MetricKind::MarketValue.format(11_672_925_008.0), "$11.67B");
        assert_eq!(MetricKind::MarketValue.format(450_000_000.0), "$450M");
        assert_eq!(MetricKind::MarketValue.format(450_000.0), "$450K");
    }

    #[test]
    fn formats_ratios_and_areas() {
        assert_eq!(MetricKind::Percent.format(100.0 / 3.0), "33.3%");
        assert_eq!(MetricKind::Premium.format(80.0), "+80%");
        assert_eq!(MetricKind::Premium.format(-12.4), "-12%");
        assert_eq!(MetricKind::PricePerSqft.format(264.4), "$264/sqft");
        assert_eq!(MetricKind::Area.format(2079.9), "2,080 sqft");
        assert_eq!(MetricKind::Count.format(21_613.0), "21,613");
        assert_eq!(MetricKind::Decimal.format(3.37), "3.4");
        assert_eq!(MetricKind::Coordinate.format(47.560_12), "47.5601");
    }
}
