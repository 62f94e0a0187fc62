//! Field-level parsing for a single dataset row.
//!
//! Numeric columns tolerate surrounding whitespace and integer columns
//! accept whole-valued decimals such as `"3.0"`. Anything else that does
//! not parse is a [`RowError`], never a silent zero. The only optional
//! column is `yr_renovated`, where an empty field means "never renovated".

use chrono::NaiveDate;
use csv::StringRecord;
use house_insights_property_models::PropertySale;

use crate::{COLUMNS, RowError};

/// Converts one CSV row into raw sale fields.
///
/// # Errors
///
/// Returns [`RowError`] if the row has the wrong number of fields or any
/// required field fails to parse.
pub fn parse_row(row: &StringRecord) -> Result<PropertySale, RowError> {
    if row.len() != COLUMNS.len() {
        return Err(RowError::FieldCount {
            expected: COLUMNS.len(),
            found: row.len(),
        });
    }

    let field = |idx: usize| row.get(idx).unwrap_or("").trim();

    let id = field(0);
    if id.is_empty() {
        return Err(invalid(0, id));
    }

    Ok(PropertySale {
        id: id.to_string(),
        date: parse_sale_date(field(1))?,
        price: parse_float(2, field(2))?,
        bedrooms: parse_int(3, field(3))?,
        bathrooms: parse_float(4, field(4))?,
        sqft_living: parse_float(5, field(5))?,
        sqft_lot: parse_float(6, field(6))?,
        floors: parse_float(7, field(7))?,
        waterfront: parse_flag(8, field(8))?,
        view: parse_int(9, field(9))?,
        condition: parse_int(10, field(10))?,
        grade: parse_int(11, field(11))?,
        sqft_above: parse_float(12, field(12))?,
        sqft_basement: parse_float(13, field(13))?,
        yr_built: parse_int(14, field(14))?,
        yr_renovated: if field(15).is_empty() {
            0
        } else {
            parse_int(15, field(15))?
        },
        zipcode: parse_zipcode(field(16))?,
        lat: parse_float(17, field(17))?,
        long: parse_float(18, field(18))?,
        sqft_living15: parse_float(19, field(19))?,
        sqft_lot15: parse_float(20, field(20))?,
    })
}

/// Parses an 8-digit `YYYYMMDD` sale date.
///
/// A trailing time suffix (`"20141013T000000"`) is accepted and ignored.
///
/// # Errors
///
/// Returns [`RowError::InvalidDate`] if the first eight characters are not
/// digits forming a real calendar date.
pub fn parse_sale_date(value: &str) -> Result<NaiveDate, RowError> {
    let err = || RowError::InvalidDate {
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    if bytes.len() < 8 || !bytes[..8].iter().all(u8::is_ascii_digit) {
        return Err(err());
    }

    let (digits, suffix) = value.split_at(8);
    if !(suffix.is_empty() || suffix.starts_with('T')) {
        return Err(err());
    }

    NaiveDate::parse_from_str(digits, "%Y%m%d").map_err(|_| err())
}

fn invalid(idx: usize, value: &str) -> RowError {
    RowError::InvalidField {
        column: COLUMNS[idx],
        value: value.to_string(),
    }
}

fn parse_float(idx: usize, value: &str) -> Result<f64, RowError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(idx, value))
}

#[allow(clippy::cast_possible_truncation)]
fn parse_int<T: TryFrom<i64>>(idx: usize, value: &str) -> Result<T, RowError> {
    let whole = value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    });

    whole
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| invalid(idx, value))
}

fn parse_flag(idx: usize, value: &str) -> Result<bool, RowError> {
    match parse_int::<u8>(idx, value)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(invalid(idx, value)),
    }
}

fn parse_zipcode(value: &str) -> Result<String, RowError> {
    if value.is_empty() {
        return Err(invalid(16, value));
    }
    Ok(value.to_string())
}
