#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Home sale record types and derived-field definitions.
//!
//! This crate defines the canonical [`PropertyRecord`] shared by the parser,
//! the aggregation engine, and the filter store. The price and size bucket
//! boundaries and the age reference year live here and nowhere else; every
//! derived value is computed exactly once, when a record is built from its
//! raw [`PropertySale`] fields.

use chrono::{Datelike as _, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Reference year used for [`property_age`].
///
/// The dataset covers sales from 2014 and 2015, so ages are measured against
/// its last year rather than the wall clock to stay reproducible.
pub const REFERENCE_YEAR: i32 = 2015;

/// Price band of a sale.
///
/// Bands are half-open: a price sitting exactly on a boundary belongs to the
/// higher band.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum PriceCategory {
    /// Below $250,000
    Budget,
    /// $250,000 up to (excluding) $500,000
    #[serde(rename = "Mid-Range")]
    #[strum(serialize = "Mid-Range")]
    MidRange,
    /// $500,000 up to (excluding) $1,000,000
    Premium,
    /// $1,000,000 and above
    Luxury,
}

impl PriceCategory {
    /// Lower bound of [`Self::MidRange`].
    pub const MID_RANGE_FLOOR: f64 = 250_000.0;
    /// Lower bound of [`Self::Premium`].
    pub const PREMIUM_FLOOR: f64 = 500_000.0;
    /// Lower bound of [`Self::Luxury`].
    pub const LUXURY_FLOOR: f64 = 1_000_000.0;

    /// Buckets a sale price.
    #[must_use]
    pub fn from_price(price: f64) -> Self {
        if price < Self::MID_RANGE_FLOOR {
            Self::Budget
        } else if price < Self::PREMIUM_FLOOR {
            Self::MidRange
        } else if price < Self::LUXURY_FLOOR {
            Self::Premium
        } else {
            Self::Luxury
        }
    }

    /// Returns all variants in display order (cheapest first).
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Budget, Self::MidRange, Self::Premium, Self::Luxury]
    }
}

/// Living-area band of a property.
///
/// Same half-open convention as [`PriceCategory`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum SizeCategory {
    /// Under 1,000 sqft
    Small,
    /// 1,000 up to (excluding) 2,000 sqft
    Medium,
    /// 2,000 up to (excluding) 3,000 sqft
    Large,
    /// 3,000 sqft and above
    #[serde(rename = "Very Large")]
    #[strum(serialize = "Very Large")]
    VeryLarge,
}

impl SizeCategory {
    /// Lower bound of [`Self::Medium`].
    pub const MEDIUM_FLOOR: f64 = 1_000.0;
    /// Lower bound of [`Self::Large`].
    pub const LARGE_FLOOR: f64 = 2_000.0;
    /// Lower bound of [`Self::VeryLarge`].
    pub const VERY_LARGE_FLOOR: f64 = 3_000.0;

    /// Buckets a living area in square feet.
    #[must_use]
    pub fn from_sqft(sqft_living: f64) -> Self {
        if sqft_living < Self::MEDIUM_FLOOR {
            Self::Small
        } else if sqft_living < Self::LARGE_FLOOR {
            Self::Medium
        } else if sqft_living < Self::VERY_LARGE_FLOOR {
            Self::Large
        } else {
            Self::VeryLarge
        }
    }
}

/// Property condition on the dataset's 1-5 scale.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum ConditionLevel {
    /// Level 1
    Poor = 1,
    /// Level 2
    Fair = 2,
    /// Level 3
    Average = 3,
    /// Level 4
    Good = 4,
    /// Level 5
    Excellent = 5,
}

impl ConditionLevel {
    /// Returns the numeric value of this condition level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Creates a condition level from its numeric score.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 1-5.
    pub const fn from_value(value: u8) -> Result<Self, InvalidConditionError> {
        match value {
            1 => Ok(Self::Poor),
            2 => Ok(Self::Fair),
            3 => Ok(Self::Average),
            4 => Ok(Self::Good),
            5 => Ok(Self::Excellent),
            _ => Err(InvalidConditionError { value }),
        }
    }
}

/// Error returned when a condition score falls outside the 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidConditionError {
    /// The out-of-scale score.
    pub value: u8,
}

impl std::fmt::Display for InvalidConditionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid condition value {}: expected 1-5", self.value)
    }
}

impl std::error::Error for InvalidConditionError {}

/// Display label for a raw condition score.
///
/// Scores outside the known scale fall back to `"Condition N"`.
#[must_use]
pub fn condition_label(condition: u8) -> String {
    ConditionLevel::from_value(condition).map_or_else(
        |_| format!("Condition {condition}"),
        |level| level.to_string(),
    )
}

/// Age of a property in years relative to [`REFERENCE_YEAR`].
#[must_use]
pub const fn property_age(yr_built: i32) -> i32 {
    REFERENCE_YEAR - yr_built
}

/// Price per square foot of living area, or `0.0` when the area is zero.
#[must_use]
pub fn price_per_sqft(price: f64, sqft_living: f64) -> f64 {
    if sqft_living > 0.0 {
        price / sqft_living
    } else {
        0.0
    }
}

/// Raw fields of one sale, exactly as they appear in the dataset columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySale {
    /// Unique sale identifier.
    pub id: String,
    /// Calendar date of the sale.
    pub date: NaiveDate,
    /// Sale price in dollars.
    pub price: f64,
    /// Number of bedrooms.
    pub bedrooms: u32,
    /// Number of bathrooms (fractional, e.g. 2.5).
    pub bathrooms: f64,
    /// Living area in square feet.
    pub sqft_living: f64,
    /// Lot area in square feet.
    pub sqft_lot: f64,
    /// Number of floors (fractional).
    pub floors: f64,
    /// Whether the property faces the waterfront.
    pub waterfront: bool,
    /// View score (0-4).
    pub view: u8,
    /// Condition score (1-5).
    pub condition: u8,
    /// Construction grade (1-13).
    pub grade: u8,
    /// Above-ground living area in square feet.
    pub sqft_above: f64,
    /// Basement area in square feet.
    pub sqft_basement: f64,
    /// Year of construction.
    pub yr_built: i32,
    /// Year of the last renovation, `0` if never renovated.
    pub yr_renovated: i32,
    /// Zipcode, kept verbatim so leading zeros survive.
    pub zipcode: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub long: f64,
    /// Mean living area of the 15 nearest neighbors.
    pub sqft_living15: f64,
    /// Mean lot area of the 15 nearest neighbors.
    pub sqft_lot15: f64,
}

impl PropertySale {
    /// Whether the property was ever renovated.
    #[must_use]
    pub const fn is_renovated(&self) -> bool {
        self.yr_renovated > 0
    }
}

/// Values computed from a [`PropertySale`] when a record is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedFields {
    /// Years between construction and [`REFERENCE_YEAR`].
    pub property_age: i32,
    /// Price band.
    pub price_category: PriceCategory,
    /// Living-area band.
    pub size_category: SizeCategory,
    /// Price divided by living area (`0.0` for zero area).
    pub price_per_sqft: f64,
}

impl DerivedFields {
    /// Computes every derived value from the raw sale fields.
    #[must_use]
    pub fn compute(sale: &PropertySale) -> Self {
        Self {
            property_age: property_age(sale.yr_built),
            price_category: PriceCategory::from_price(sale.price),
            size_category: SizeCategory::from_sqft(sale.sqft_living),
            price_per_sqft: price_per_sqft(sale.price, sale.sqft_living),
        }
    }
}

/// One home sale with its derived fields.
///
/// Fields are only reachable through accessors so the raw values and the
/// derived values can never drift apart after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRecord {
    #[serde(flatten)]
    sale: PropertySale,
    #[serde(flatten)]
    derived: DerivedFields,
}

impl PropertyRecord {
    /// Builds a record, computing its derived fields.
    #[must_use]
    pub fn new(sale: PropertySale) -> Self {
        let derived = DerivedFields::compute(&sale);
        Self { sale, derived }
    }

    /// The raw sale fields.
    #[must_use]
    pub const fn sale(&self) -> &PropertySale {
        &self.sale
    }

    /// Unique sale identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.sale.id
    }

    /// Sale date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.sale.date
    }

    /// Sale price.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.sale.price
    }

    /// Zipcode as it appeared in the source.
    #[must_use]
    pub fn zipcode(&self) -> &str {
        &self.sale.zipcode
    }

    #[must_use]
    pub const fn property_age(&self) -> i32 {
        self.derived.property_age
    }

    #[must_use]
    pub const fn price_category(&self) -> PriceCategory {
        self.derived.price_category
    }

    #[must_use]
    pub const fn size_category(&self) -> SizeCategory {
        self.derived.size_category
    }

    #[must_use]
    pub const fn price_per_sqft(&self) -> f64 {
        self.derived.price_per_sqft
    }

    /// Zero-padded `YYYY-MM` key of the sale month.
    ///
    /// Lexicographic order of these keys is chronological order.
    #[must_use]
    pub fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.sale.date.year(), self.sale.date.month())
    }
}
