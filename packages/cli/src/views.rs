//! Dashboard views rendered from the filtered dataset.

use house_insights_analytics::{
    group_by_bedrooms, group_by_condition, group_by_grade, group_by_month,
    group_by_price_category, group_by_zipcode, paginate, portfolio_metrics,
    price_distribution, price_vs_area_sample_with_cap, search_records,
};
use house_insights_analytics_models::{DateBounds, ZipcodeGroup};
use house_insights_filter::{FilterSelection, FilterStore};
use serde::Serialize;

use crate::config::{DashboardConfig, Theme};
use crate::format::MetricKind;

/// Ordering for the zipcode view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ZipcodeOrder {
    /// Most expensive first.
    #[default]
    Price,
    /// Most sales first.
    Volume,
}

/// A dashboard panel.
#[derive(Debug, Clone, PartialEq, Eq, clap::Subcommand)]
pub enum View {
    /// Portfolio KPIs
    Summary,
    /// Sales and mean price per bedroom count
    Bedrooms {
        /// Show every bedroom count, not just the configured display range
        #[arg(long)]
        all: bool,
    },
    /// Share of sales per price band
    Categories,
    /// Sales and mean price per condition score
    Conditions,
    /// Sales and mean price per construction grade
    Grades,
    /// Monthly sales trend
    Months,
    /// Top zipcodes by mean price or sales volume
    Zipcodes {
        /// Ranking to use
        #[arg(long, value_enum, default_value_t)]
        by: ZipcodeOrder,
        /// Number of zipcodes to show (defaults to `top_zipcodes`)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Price vs living area sample
    Sample {
        /// Maximum points (defaults to `sample_cap`)
        #[arg(long)]
        cap: Option<usize>,
    },
    /// Searchable, paginated property table
    Table {
        /// Match against zipcode, id, or price band
        #[arg(long)]
        search: Option<String>,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Price spread and attribute averages
    Details,
    /// Zipcodes available for filtering
    ZipcodeList,
    /// Current filter selection and available ranges
    Filters,
}

impl View {
    /// Every view with default arguments, in menu order.
    #[must_use]
    pub const fn menu() -> [Self; 12] {
        [
            Self::Summary,
            Self::Bedrooms { all: false },
            Self::Categories,
            Self::Conditions,
            Self::Grades,
            Self::Months,
            Self::Zipcodes {
                by: ZipcodeOrder::Price,
                limit: None,
            },
            Self::Zipcodes {
                by: ZipcodeOrder::Volume,
                limit: None,
            },
            Self::Sample { cap: None },
            Self::Table {
                search: None,
                page: 1,
            },
            Self::Details,
            Self::Filters,
        ]
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Summary => "Portfolio summary",
            Self::Bedrooms { .. } => "Bedrooms",
            Self::Categories => "Price categories",
            Self::Conditions => "Property condition",
            Self::Grades => "Construction grade",
            Self::Months => "Monthly trend",
            Self::Zipcodes {
                by: ZipcodeOrder::Price,
                ..
            } => "Top zipcodes by price",
            Self::Zipcodes {
                by: ZipcodeOrder::Volume,
                ..
            } => "Top zipcodes by volume",
            Self::Sample { .. } => "Price vs area sample",
            Self::Table { .. } => "Property table",
            Self::Details => "Detail statistics",
            Self::ZipcodeList => "Available zipcodes",
            Self::Filters => "Active filters",
        }
    }
}

/// Renders `view` over the store's filtered records.
///
/// # Errors
///
/// Returns an error if `json` is set and serialization fails.
#[allow(clippy::too_many_lines)]
pub fn render(
    view: &View,
    store: &FilterStore,
    config: &DashboardConfig,
    json: bool,
) -> Result<String, serde_json::Error> {
    let theme = config.theme;

    match view {
        View::Summary => {
            let metrics = portfolio_metrics(store.filtered());
            emit(json, &metrics, || {
                let mut out = heading(theme, view.label());
                let cards = [
                    ("Properties", MetricKind::Count, count(metrics.total_properties)),
                    ("Market value", MetricKind::MarketValue, metrics.total_value),
                    ("Average price", MetricKind::CompactPrice, metrics.avg_price),
                    ("Average area", MetricKind::Area, metrics.avg_sqft),
                    ("Price per sqft", MetricKind::PricePerSqft, metrics.avg_price_per_sqft),
                    ("Waterfront sales", MetricKind::Count, count(metrics.waterfront_count)),
                    ("Waterfront premium", MetricKind::Premium, metrics.waterfront_premium),
                ];
                for (label, kind, value) in cards {
                    out.push_str(&format!("{label:<20} {}\n", kind.format(value)));
                }
                out.push_str(&format!(
                    "\n{} of {} sales match the current filters\n",
                    MetricKind::Count.format(count(metrics.total_properties)),
                    MetricKind::Count.format(count(store.records().len() as u64)),
                ));
                out
            })
        }
        View::Bedrooms { all } => {
            let groups: Vec<_> = group_by_bedrooms(store.filtered())
                .into_iter()
                .filter(|g| *all || config.bedroom_display.contains(g.bedrooms))
                .collect();
            emit(json, &groups, || {
                let mut table = TextTable::new([
                    Column::metric("Bedrooms", MetricKind::Count),
                    Column::metric("Sales", MetricKind::Count),
                    Column::metric("Avg price", MetricKind::Price),
                ]);
                for g in &groups {
                    table.push([
                        Cell::Number(f64::from(g.bedrooms)),
                        Cell::Number(count(g.count)),
                        Cell::Number(g.avg_price),
                    ]);
                }
                titled(theme, view.label(), &table)
            })
        }
        View::Categories => {
            let groups = group_by_price_category(store.filtered());
            emit(json, &groups, || {
                let mut table = TextTable::new([
                    Column::text("Category"),
                    Column::metric("Sales", MetricKind::Count),
                    Column::metric("Share", MetricKind::Percent),
                ]);
                for g in &groups {
                    table.push([
                        Cell::Text(g.category.to_string()),
                        Cell::Number(count(g.count)),
                        Cell::Number(g.percentage),
                    ]);
                }
                titled(theme, view.label(), &table)
            })
        }
        View::Conditions => {
            let groups = group_by_condition(store.filtered());
            emit(json, &groups, || {
                let mut table = TextTable::new([
                    Column::text("Condition"),
                    Column::metric("Sales", MetricKind::Count),
                    Column::metric("Avg price", MetricKind::Price),
                ]);
                for g in &groups {
                    table.push([
                        Cell::Text(g.label.clone()),
                        Cell::Number(count(g.count)),
                        Cell::Number(g.avg_price),
                    ]);
                }
                titled(theme, view.label(), &table)
            })
        }
        View::Grades => {
            let groups = group_by_grade(store.filtered());
            emit(json, &groups, || {
                let mut table = TextTable::new([
                    Column::metric("Grade", MetricKind::Count),
                    Column::metric("Sales", MetricKind::Count),
                    Column::metric("Avg price", MetricKind::Price),
                ]);
                for g in &groups {
                    table.push([
                        Cell::Number(f64::from(g.grade)),
                        Cell::Number(count(g.count)),
                        Cell::Number(g.avg_price),
                    ]);
                }
                titled(theme, view.label(), &table)
            })
        }
        View::Months => {
            let groups = group_by_month(store.filtered());
            emit(json, &groups, || {
                let mut table = TextTable::new([
                    Column::text("Month"),
                    Column::metric("Sales", MetricKind::Count),
                    Column::metric("Avg price", MetricKind::Price),
                    Column::metric("Total value", MetricKind::MarketValue),
                ]);
                for g in &groups {
                    table.push([
                        Cell::Text(g.month.clone()),
                        Cell::Number(count(g.count)),
                        Cell::Number(g.avg_price),
                        Cell::Number(g.total_value),
                    ]);
                }
                titled(theme, view.label(), &table)
            })
        }
        View::Zipcodes { by, limit } => {
            let groups = group_by_zipcode(store.filtered());
            let limit = limit.unwrap_or(config.top_zipcodes);
            let top: Vec<&ZipcodeGroup> = match by {
                ZipcodeOrder::Price => groups.top_by_price(limit).iter().collect(),
                ZipcodeOrder::Volume => groups.top_by_volume(limit),
            };
            emit(json, &top, || {
                let mut table = TextTable::new([
                    Column::text("Zipcode"),
                    Column::metric("Sales", MetricKind::Count),
                    Column::metric("Avg price", MetricKind::Price),
                    Column::metric("Total value", MetricKind::MarketValue),
                    Column::metric("Lat", MetricKind::Coordinate),
                    Column::metric("Long", MetricKind::Coordinate),
                ]);
                for g in &top {
                    table.push([
                        Cell::Text(g.zipcode.clone()),
                        Cell::Number(count(g.count)),
                        Cell::Number(g.avg_price),
                        Cell::Number(g.total_value),
                        Cell::Number(g.lat),
                        Cell::Number(g.long),
                    ]);
                }
                titled(theme, view.label(), &table)
            })
        }
        View::Sample { cap } => {
            let points =
                price_vs_area_sample_with_cap(store.filtered(), cap.unwrap_or(config.sample_cap));
            emit(json, &points, || {
                let mut table = TextTable::new([
                    Column::metric("Area", MetricKind::Area),
                    Column::metric("Price", MetricKind::Price),
                    Column::metric("Bedrooms", MetricKind::Count),
                    Column::text("Waterfront"),
                ]);
                for p in &points {
                    table.push([
                        Cell::Number(p.sqft),
                        Cell::Number(p.price),
                        Cell::Number(f64::from(p.bedrooms)),
                        Cell::Text(yes_no(p.waterfront).to_string()),
                    ]);
                }
                titled(theme, view.label(), &table)
            })
        }
        View::Table { search, page } => {
            let matches = search_records(store.filtered(), search.as_deref().unwrap_or(""));
            let page = paginate(&matches, *page, config.page_size);
            emit(json, &page, || {
                let mut table = TextTable::new([
                    Column::text("Id"),
                    Column::text("Date"),
                    Column::text("Zipcode"),
                    Column::metric("Price", MetricKind::Price),
                    Column::metric("Beds", MetricKind::Count),
                    Column::metric("Baths", MetricKind::Decimal),
                    Column::metric("Area", MetricKind::Area),
                    Column::text("Category"),
                ]);
                for r in &page.items {
                    let sale = r.sale();
                    table.push([
                        Cell::Text(sale.id.clone()),
                        Cell::Text(sale.date.to_string()),
                        Cell::Text(sale.zipcode.clone()),
                        Cell::Number(sale.price),
                        Cell::Number(f64::from(sale.bedrooms)),
                        Cell::Number(sale.bathrooms),
                        Cell::Number(sale.sqft_living),
                        Cell::Text(r.price_category().to_string()),
                    ]);
                }
                let mut out = titled(theme, view.label(), &table);
                out.push_str(&format!(
                    "Showing {}-{} of {} (page {}/{})\n",
                    page.first_row, page.last_row, page.total_items, page.page, page.total_pages
                ));
                out
            })
        }
        View::Details => {
            let distribution = price_distribution(store.filtered());
            emit(json, &distribution, || {
                let mut out = heading(theme, view.label());
                let Some(d) = &distribution else {
                    out.push_str("No sales match the current filters\n");
                    return out;
                };
                let stats = [
                    ("Median price", MetricKind::Price, d.median),
                    ("Lowest price", MetricKind::Price, d.min),
                    ("Highest price", MetricKind::Price, d.max),
                    ("Avg bedrooms", MetricKind::Decimal, d.avg_bedrooms),
                    ("Avg bathrooms", MetricKind::Decimal, d.avg_bathrooms),
                    ("Avg grade", MetricKind::Decimal, d.avg_grade),
                    ("Waterfront sales", MetricKind::Count, count(d.waterfront_count)),
                ];
                for (label, kind, value) in stats {
                    out.push_str(&format!("{label:<20} {}\n", kind.format(value)));
                }
                out
            })
        }
        View::ZipcodeList => {
            let zipcodes = store.available_zipcodes();
            emit(json, &zipcodes, || {
                let mut out = heading(theme, view.label());
                for zipcode in &zipcodes {
                    out.push_str(zipcode);
                    out.push('\n');
                }
                out
            })
        }
        View::Filters => {
            let summary = FilterSummary {
                selection: store.selection(),
                matching: store.filtered_count(),
                total: store.records().len(),
                years: store.available_years(),
                date_bounds: store.available_date_bounds(),
            };
            emit(json, &summary, || summary.to_text(theme))
        }
    }
}

/// Current selection plus the options it was chosen from.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FilterSummary<'a> {
    selection: &'a FilterSelection,
    matching: usize,
    total: usize,
    years: Vec<i32>,
    date_bounds: Option<DateBounds>,
}

impl FilterSummary<'_> {
    fn to_text(&self, theme: Theme) -> String {
        let mut out = heading(theme, "Active filters");
        let range = &self.selection.date_range;
        let bound = |date: Option<chrono::NaiveDate>| {
            date.map_or_else(|| "any".to_string(), |d| d.to_string())
        };
        let zipcodes = join_or_all(&self.selection.zipcodes);
        let bedrooms = join_or_all(&self.selection.bedrooms);
        out.push_str(&format!("{:<12} {} to {}\n", "Dates", bound(range.start), bound(range.end)));
        out.push_str(&format!("{:<12} {zipcodes}\n", "Zipcodes"));
        out.push_str(&format!("{:<12} {bedrooms}\n", "Bedrooms"));
        out.push_str(&format!("{:<12} {} of {}\n", "Matching", self.matching, self.total));
        if let Some(bounds) = self.date_bounds {
            out.push_str(&format!("{:<12} {} to {}\n", "Data spans", bounds.min, bounds.max));
        }
        out
    }
}

fn join_or_all<T: ToString>(values: impl IntoIterator<Item = T>) -> String {
    let joined: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
    if joined.is_empty() {
        "all".to_string()
    } else {
        joined.join(", ")
    }
}

fn emit<T: Serialize + ?Sized>(
    json: bool,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<String, serde_json::Error> {
    if json {
        serde_json::to_string_pretty(value)
    } else {
        Ok(text())
    }
}

#[allow(clippy::cast_precision_loss)]
fn count(value: u64) -> f64 {
    value as f64
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn heading(theme: Theme, title: &str) -> String {
    let title = match theme {
        Theme::Plain => title.to_string(),
        Theme::Color => console::Style::new()
            .bold()
            .cyan()
            .apply_to(title)
            .to_string(),
    };
    format!("{title}\n\n")
}

fn titled(theme: Theme, title: &str, table: &TextTable) -> String {
    let mut out = heading(theme, title);
    out.push_str(&table.render(theme));
    out
}

/// One table column. Numeric columns carry the [`MetricKind`] every cell
/// in them is formatted with.
struct Column {
    title: &'static str,
    kind: Option<MetricKind>,
}

impl Column {
    const fn text(title: &'static str) -> Self {
        Self { title, kind: None }
    }

    const fn metric(title: &'static str, kind: MetricKind) -> Self {
        Self {
            title,
            kind: Some(kind),
        }
    }
}

enum Cell {
    Text(String),
    Number(f64),
}

/// Plain-text table. Text columns are left-aligned, metric columns
/// right-aligned.
struct TextTable {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    fn new(columns: impl IntoIterator<Item = Column>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, cells: impl IntoIterator<Item = Cell>) {
        let row = cells
            .into_iter()
            .zip(&self.columns)
            .map(|(cell, column)| match (cell, column.kind) {
                (Cell::Text(text), _) => text,
                (Cell::Number(value), Some(kind)) => kind.format(value),
                (Cell::Number(value), None) => value.to_string(),
            })
            .collect();
        self.rows.push(row);
    }

    fn render(&self, theme: Theme) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.title.len()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        let header = self.line(&widths, self.columns.iter().map(|c| c.title));
        let header = match theme {
            Theme::Plain => header,
            Theme::Color => console::Style::new().bold().apply_to(header).to_string(),
        };

        let mut out = String::new();
        let rule = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&header);
        out.push('\n');
        out.push_str(&"-".repeat(rule));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&self.line(&widths, row.iter().map(String::as_str)));
            out.push('\n');
        }
        out
    }

    fn line<'a>(&self, widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
        cells
            .zip(self.columns.iter().zip(widths))
            .map(|(cell, (column, &width))| {
                if column.kind.is_some() {
                    format!("{cell:>width$}")
                } else {
                    format!("{cell:<width$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use house_insights_filter::DateRange;
    use house_insights_property_models::{PropertyRecord, PropertySale};

    fn sale(id: &str, price: f64, bedrooms: u32, zipcode: &str, waterfront: bool) -> PropertyRecord {
        PropertyRecord::new(PropertySale {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2014, 10, 13).unwrap(),
            price,
            bedrooms,
            bathrooms: 2.0,
            sqft_living: 2000.0,
            sqft_lot: 5000.0,
            floors: 1.0,
            waterfront,
            view: 0,
            condition: 3,
            grade: 7,
            sqft_above: 2000.0,
            sqft_basement: 0.0,
            yr_built: 1990,
            yr_renovated: 0,
            zipcode: zipcode.to_string(),
            lat: 47.5,
            long: -122.2,
            sqft_living15: 2000.0,
            sqft_lot15: 5000.0,
        })
    }

    fn store() -> FilterStore {
        FilterStore::new(vec![
            sale("A1", 200_000.0, 2, "98001", false),
            sale("B2", 400_000.0, 3, "98103", false),
            sale("C3", 900_000.0, 9, "98004", true),
            sale("D4", 1_500_000.0, 4, "98004", true),
        ])
    }

    fn plain(view: &View, store: &FilterStore) -> String {
        render(view, store, &DashboardConfig::default(), false).unwrap()
    }

    #[test]
    fn summary_shows_formatted_kpis() {
        let out = plain(&View::Summary, &store());
        assert!(out.contains(&format!("{:<20} 4", "Properties")), "{out}");
        assert!(out.contains("$3M"), "{out}");
        assert!(out.contains("4 of 4 sales"), "{out}");
    }

    #[test]
    fn bedrooms_respects_display_range_unless_all() {
        let store = store();
        let limited = plain(&View::Bedrooms { all: false }, &store);
        assert!(!limited.lines().any(|l| l.trim_start().starts_with('9')), "{limited}");

        let all = plain(&View::Bedrooms { all: true }, &store);
        assert!(all.lines().any(|l| l.trim_start().starts_with('9')), "{all}");
    }

    #[test]
    fn categories_always_lists_four_bands() {
        let mut store = store();
        store.set_zipcodes(["00000"]);
        let out = plain(&View::Categories, &store);
        for label in ["Budget", "Mid-Range", "Premium", "Luxury"] {
            assert!(out.contains(label), "missing {label}: {out}");
        }
        assert!(out.contains("0.0%"), "{out}");
    }

    #[test]
    fn zipcodes_follow_requested_order_and_limit() {
        let out = plain(
            &View::Zipcodes {
                by: ZipcodeOrder::Price,
                limit: Some(1),
            },
            &store(),
        );
        assert!(out.contains("98004"), "{out}");
        assert!(!out.contains("98001"), "{out}");
    }

    #[test]
    fn table_reports_page_bounds() {
        let config = DashboardConfig {
            page_size: 3,
            ..DashboardConfig::default()
        };
        let view = View::Table {
            search: None,
            page: 2,
        };
        let out = render(&view, &store(), &config, false).unwrap();
        assert!(out.contains("Showing 4-4 of 4 (page 2/2)"), "{out}");
        assert!(out.contains("D4"), "{out}");
        assert!(!out.contains("A1"), "{out}");
    }

    #[test]
    fn table_search_narrows_rows() {
        let view = View::Table {
            search: Some("luxury".to_string()),
            page: 1,
        };
        let out = plain(&view, &store());
        assert!(out.contains("D4"), "{out}");
        assert!(!out.contains("B2"), "{out}");
        assert!(out.contains("of 1 (page 1/1)"), "{out}");
    }

    #[test]
    fn details_handles_empty_selection() {
        let mut store = store();
        store.set_date_range(DateRange::year(2015).unwrap());
        let out = plain(&View::Details, &store);
        assert!(out.contains("No sales match"), "{out}");

        let json = render(&View::Details, &store, &DashboardConfig::default(), true).unwrap();
        assert_eq!(json, "null");
    }

    #[test]
    fn json_output_uses_camel_case_fields() {
        let json = render(&View::Summary, &store(), &DashboardConfig::default(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalProperties"], 4);
        assert_eq!(value["waterfrontCount"], 2);
    }

    #[test]
    fn filters_view_lists_selection() {
        let mut store = store();
        store.set_bedrooms([3, 4]);
        let out = plain(&View::Filters, &store);
        assert!(out.contains(&format!("{:<12} 3, 4", "Bedrooms")), "{out}");
        assert!(out.contains(&format!("{:<12} all", "Zipcodes")), "{out}");
        assert!(out.contains("2 of 4"), "{out}");
    }

    #[test]
    fn text_table_aligns_columns_under_rule() {
        let mut table = TextTable::new([
            Column::text("Zipcode"),
            Column::metric("Avg price", MetricKind::Price),
        ]);
        table.push([Cell::Text("98004".to_string()), Cell::Number(1_200_000.0)]);
        table.push([Cell::Text("98001".to_string()), Cell::Number(200_000.0)]);

        let out = table.render(Theme::Plain);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "Zipcode   Avg price",
                "-------------------",
                "98004    $1,200,000",
                "98001      $200,000",
            ]
        );
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn menu_labels_are_unique() {
        let labels: std::collections::BTreeSet<_> = View::menu().iter().map(View::label).collect();
        assert_eq!(labels.len(), View::menu().len());
    }
}
