//! Synthetic records for unit tests.

use chrono::NaiveDate;
use house_insights_property_models::{PropertyRecord, PropertySale};

/// Builder over a plain three-bedroom sale in 98178.
pub struct SaleBuilder {
    sale: PropertySale,
}

impl SaleBuilder {
    pub fn new(id: &str, price: f64) -> Self {
        Self {
            sale: PropertySale {
                id: id.to_string(),
                date: NaiveDate::from_ymd_opt(2014, 10, 13).unwrap(),
                price,
                bedrooms: 3,
                bathrooms: 1.0,
                sqft_living: 1500.0,
                sqft_lot: 5000.0,
                floors: 1.0,
                waterfront: false,
                view: 0,
                condition: 3,
                grade: 7,
                sqft_above: 1500.0,
                sqft_basement: 0.0,
                yr_built: 1970,
                yr_renovated: 0,
                zipcode: "98178".to_string(),
                lat: 47.5,
                long: -122.25,
                sqft_living15: 1500.0,
                sqft_lot15: 5000.0,
            },
        }
    }

    pub fn bedrooms(mut self, bedrooms: u32) -> Self {
        self.sale.bedrooms = bedrooms;
        self
    }

    pub fn bathrooms(mut self, bathrooms: f64) -> Self {
        self.sale.bathrooms = bathrooms;
        self
    }

    pub fn sqft(mut self, sqft_living: f64) -> Self {
        self.sale.sqft_living = sqft_living;
        self
    }

    pub fn waterfront(mut self, waterfront: bool) -> Self {
        self.sale.waterfront = waterfront;
        self
    }

    pub fn condition(mut self, condition: u8) -> Self {
        self.sale.condition = condition;
        self
    }

    pub fn grade(mut self, grade: u8) -> Self {
        self.sale.grade = grade;
        self
    }

    pub fn date(mut self, year: i32, month: u32, day: u32) -> Self {
        self.sale.date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        self
    }

    pub fn zipcode(mut self, zipcode: &str) -> Self {
        self.sale.zipcode = zipcode.to_string();
        self
    }

    pub fn location(mut self, lat: f64, long: f64) -> Self {
        self.sale.lat = lat;
        self.sale.long = long;
        self
    }

    pub fn build(self) -> PropertyRecord {
        PropertyRecord::new(self.sale)
    }
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
