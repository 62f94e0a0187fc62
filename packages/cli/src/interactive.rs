//! Interactive filter panel and view picker.
//!
//! Mirrors the dashboard's filter bar: year, zipcode and bedroom pickers,
//! followed by the view to render. Loops until the user is done.

use dialoguer::{Confirm, Input, Select};
use house_insights_filter::{DateRange, FilterStore};

use crate::config::DashboardConfig;
use crate::views::{self, View};

/// Zipcodes offered by the picker.
const ZIPCODE_CHOICES: usize = 20;

/// Runs the picker loop over `store`.
///
/// # Errors
///
/// Returns an error if a prompt fails or a view cannot be rendered.
pub fn run(store: &mut FilterStore, config: &DashboardConfig) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        pick_year(store)?;
        pick_zipcode(store)?;
        pick_bedrooms(store, config)?;

        let view = pick_view()?;
        println!();
        println!("{}", views::render(&view, store, config, false)?);

        let again = Confirm::new()
            .with_prompt("Show another view?")
            .default(true)
            .interact()?;
        if !again {
            return Ok(());
        }
    }
}

fn pick_year(store: &mut FilterStore) -> Result<(), Box<dyn std::error::Error>> {
    let years = store.available_years();
    let labels: Vec<String> = std::iter::once("All years".to_string())
        .chain(years.iter().map(ToString::to_string))
        .collect();

    let idx = Select::new()
        .with_prompt("Year")
        .items(&labels)
        .default(0)
        .interact()?;

    let range = match idx.checked_sub(1) {
        Some(i) => DateRange::year(years[i]).unwrap_or_default(),
        None => DateRange::default(),
    };
    store.set_date_range(range);
    Ok(())
}

fn pick_zipcode(store: &mut FilterStore) -> Result<(), Box<dyn std::error::Error>> {
    let zipcodes: Vec<String> = store
        .available_zipcodes()
        .into_iter()
        .take(ZIPCODE_CHOICES)
        .collect();
    let labels: Vec<&str> = std::iter::once("All zipcodes")
        .chain(zipcodes.iter().map(String::as_str))
        .collect();

    let idx = Select::new()
        .with_prompt("Zipcode")
        .items(&labels)
        .default(0)
        .interact()?;

    match idx.checked_sub(1) {
        Some(i) => store.set_zipcodes([zipcodes[i].clone()]),
        None => store.set_zipcodes(Vec::<String>::new()),
    }
    Ok(())
}

fn pick_bedrooms(
    store: &mut FilterStore,
    config: &DashboardConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let range = config.bedroom_display.min..=config.bedroom_display.max;
    let counts: Vec<u32> = range.collect();
    let labels: Vec<String> = std::iter::once("All bedrooms".to_string())
        .chain(counts.iter().map(|n| format!("{n} bedroom(s)")))
        .collect();

    let idx = Select::new()
        .with_prompt("Bedrooms")
        .items(&labels)
        .default(0)
        .interact()?;

    match idx.checked_sub(1) {
        Some(i) => store.set_bedrooms([counts[i]]),
        None => store.set_bedrooms([]),
    }
    Ok(())
}

fn pick_view() -> Result<View, Box<dyn std::error::Error>> {
    let menu = View::menu();
    let labels: Vec<&str> = menu.iter().map(View::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to see?")
        .items(&labels)
        .default(0)
        .interact()?;

    let view = match &menu[idx] {
        View::Table { .. } => {
            let search: String = Input::new()
                .with_prompt("Search (empty for all)")
                .allow_empty(true)
                .interact_text()?;
            let page: usize = Input::new()
                .with_prompt("Page")
                .default(1)
                .interact_text()?;
            View::Table {
                search: Some(search).filter(|s| !s.trim().is_empty()),
                page,
            }
        }
        other => other.clone(),
    };
    Ok(view)
}
