//! Search and pagination for the property table.

use house_insights_analytics_models::TablePage;
use house_insights_property_models::PropertyRecord;

/// Keeps records whose zipcode, id, or price-category label contains
/// `term`. Id and label matching ignore case. An empty (or all-whitespace)
/// term keeps every record.
#[must_use]
pub fn search_records<'a>(
    records: impl IntoIterator<Item = &'a PropertyRecord>,
    term: &str,
) -> Vec<&'a PropertyRecord> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return records.into_iter().collect();
    }

    records
        .into_iter()
        .filter(|r| {
            r.zipcode().contains(&term)
                || r.id().to_lowercase().contains(&term)
                || r.price_category().as_ref().to_lowercase().contains(&term)
        })
        .collect()
}

/// Slices one page out of `rows`.
///
/// `page` is 1-based and clamped into `1..=total_pages`; a `per_page` of
/// zero is treated as one.
#[must_use]
pub fn paginate<T: Clone>(rows: &[T], page: usize, per_page: usize) -> TablePage<T> {
    let per_page = per_page.max(1);
    let total_items = rows.len();
    let total_pages = total_items.div_ceil(per_page);

    if total_pages == 0 {
        return TablePage {
            items: Vec::new(),
            page: 1,
            total_pages,
            total_items,
            first_row: 0,
            last_row: 0,
        };
    }

    let page = page.clamp(1, total_pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);

    TablePage {
        items: rows[start..end].to_vec(),
        page,
        total_pages,
        total_items,
        first_row: start + 1,
        last_row: end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::SaleBuilder;

    fn table_records() -> Vec<PropertyRecord> {
        vec![
            SaleBuilder::new("7129300520", 221_900.0).zipcode("98178").build(),
            SaleBuilder::new("6414100192", 538_000.0).zipcode("98125").build(),
            SaleBuilder::new("5631500400", 180_000.0).zipcode("98028").build(),
            SaleBuilder::new("AB-12", 1_225_000.0).zipcode("98053").build(),
        ]
    }

    #[test]
    fn empty_term_keeps_everything() {
        let records = table_records();
        assert_eq!(search_records(&records, "").len(), 4);
        assert_eq!(search_records(&records, "   ").len(), 4);
    }

    #[test]
    fn matches_zipcode_id_and_category() {
        let records = table_records();

        let by_zip = search_records(&records, "9812");
        assert_eq!(by_zip.len(), 1);
        assert_eq!(by_zip[0].id(), "6414100192");

        let by_id = search_records(&records, "ab-1");
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].id(), "AB-12");

        let by_category = search_records(&records, "LUXURY");
        assert_eq!(by_category.len(), 1);

        let budget = search_records(&records, "budget");
        assert_eq!(budget.len(), 2);

        assert!(search_records(&records, "no-such-thing").is_empty());
    }

    #[test]
    fn paginates_with_clamping() {
        let rows: Vec<u32> = (1..=23).collect();

        let first = paginate(&rows, 1, 10);
        assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);
        assert_eq!((first.first_row, first.last_row), (1, 10));

        let last = paginate(&rows, 3, 10);
        assert_eq!(last.items, [21, 22, 23]);
        assert_eq!((last.first_row, last.last_row), (21, 23));

        assert_eq!(paginate(&rows, 99, 10).page, 3);
        assert_eq!(paginate(&rows, 0, 10).page, 1);
    }

    #[test]
    fn paginating_nothing_yields_an_empty_first_page() {
        let page = paginate::<u32>(&[], 4, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert_eq!((page.first_row, page.last_row), (0, 0));
    }
}
