//! Command-line filter flags.

use chrono::NaiveDate;
use house_insights_filter::{DateRange, FilterStore};

/// Errors from translating filter flags into a selection.
#[derive(Debug, thiserror::Error)]
pub enum FilterArgsError {
    /// `--year` has no January 1st or December 31st in chrono's range.
    #[error("Year {0} is outside the supported date range")]
    YearOutOfRange(i32),
}

/// Filter flags shared by every view.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub struct FilterArgs {
    /// Keep sales from this calendar year
    #[arg(long, global = true, conflicts_with_all = ["from", "to"])]
    pub year: Option<i32>,

    /// Keep sales on or after this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub from: Option<NaiveDate>,

    /// Keep sales on or before this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub to: Option<NaiveDate>,

    /// Keep sales in this zipcode (repeatable)
    #[arg(long = "zipcode", global = true)]
    pub zipcodes: Vec<String>,

    /// Keep sales with this many bedrooms (repeatable)
    #[arg(long = "bedrooms", global = true)]
    pub bedrooms: Vec<u32>,
}

impl FilterArgs {
    /// The date range these flags select.
    ///
    /// # Errors
    ///
    /// Returns [`FilterArgsError::YearOutOfRange`] if `--year` cannot be
    /// represented as a calendar date.
    pub fn date_range(&self) -> Result<DateRange, FilterArgsError> {
        match self.year {
            Some(year) => DateRange::year(year).ok_or(FilterArgsError::YearOutOfRange(year)),
            None => Ok(DateRange {
                start: self.from,
                end: self.to,
            }),
        }
    }

    /// Pushes every flag into `store` through its setters.
    ///
    /// # Errors
    ///
    /// Returns [`FilterArgsError`] if a flag is out of range.
    pub fn apply(&self, store: &mut FilterStore) -> Result<(), FilterArgsError> {
        store.set_date_range(self.date_range()?);
        store.set_zipcodes(self.zipcodes.iter().cloned());
        store.set_bedrooms(self.bedrooms.iter().copied());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        filters: FilterArgs,
    }

    fn parse(args: &[&str]) -> Result<FilterArgs, clap::Error> {
        TestCli::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .map(|cli| cli.filters)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_flags_means_no_filter() {
        let args = parse(&[]).unwrap();
        assert_eq!(args, FilterArgs::default());
        assert!(args.date_range().unwrap().is_unbounded());
    }

    #[test]
    fn year_selects_calendar_year() {
        let args = parse(&["--year", "2014"]).unwrap();
        assert_eq!(args.date_range().unwrap(), DateRange::new(date(2014, 1, 1), date(2014, 12, 31)));
    }

    #[test]
    fn explicit_dates_may_be_half_open() {
        let args = parse(&["--from", "2015-02-01"]).unwrap();
        let range = args.date_range().unwrap();
        assert_eq!(range.start, Some(date(2015, 2, 1)));
        assert_eq!(range.end, None);
    }

    #[test]
    fn year_conflicts_with_explicit_dates() {
        assert!(parse(&["--year", "2014", "--to", "2014-06-30"]).is_err());
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse(&["--from", "20140501"]).is_err());
    }

    #[test]
    fn repeated_flags_accumulate() {
        let args = parse(&["--zipcode", "98103", "--zipcode", "98004", "--bedrooms", "3"]).unwrap();
        assert_eq!(args.zipcodes, ["98103", "98004"]);
        assert_eq!(args.bedrooms, [3]);
    }

    #[test]
    fn out_of_range_year_is_an_error() {
        let args = FilterArgs {
            year: Some(i32::MAX),
            ..FilterArgs::default()
        };
        assert!(matches!(
            args.apply(&mut FilterStore::default()),
            Err(FilterArgsError::YearOutOfRange(_))
        ));
    }

    #[test]
    fn apply_replaces_store_selection() {
        let mut store = FilterStore::default();
        store.set_zipcodes(["98001"]);

        let args = parse(&["--zipcode", "98103", "--bedrooms", "2", "--bedrooms", "3"]).unwrap();
        args.apply(&mut store).unwrap();

        let selection = store.selection();
        assert_eq!(selection.zipcodes.iter().collect::<Vec<_>>(), ["98103"]);
        assert_eq!(selection.bedrooms.iter().copied().collect::<Vec<_>>(), [2, 3]);
        assert!(selection.date_range.is_unbounded());
    }
}
