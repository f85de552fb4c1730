//! Filter/aggregate engine for derived admin views.
//!
//! Everything here is a pure function of a snapshot plus a filter
//! specification. Derived numbers (counts, sums, averages) are always
//! recomputed from the snapshot they describe; nothing keeps a running
//! total that could drift from the data.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Sentinel filter value meaning "no constraint on this dimension".
pub const ALL: &str = "all";

/// A calendar-month bucket relative to a reference day.
///
/// `offset` 0 is the month containing `today`, -1 the previous month. The
/// reference day is supplied by the caller at evaluation time; the window is
/// recomputed per render, never stored on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub today: NaiveDate,
    pub offset: i32,
}

impl MonthWindow {
    pub fn new(today: NaiveDate, offset: i32) -> Self {
        Self { today, offset }
    }

    /// The (year, month) this window selects.
    fn target(&self) -> (i32, u32) {
        use chrono::Datelike;
        let months = self.today.year() * 12 + self.today.month0() as i32 + self.offset;
        (months.div_euclid(12), months.rem_euclid(12) as u32 + 1)
    }

    /// Whether a date falls inside this window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;
        (date.year(), date.month()) == self.target()
    }
}

/// An entity the filter engine can evaluate.
pub trait Filterable {
    /// Text fields matched by the search term, in no particular order.
    fn search_fields(&self) -> Vec<&str>;

    /// Lowercase category key, when the entity has a category dimension.
    fn category_key(&self) -> Option<&str> {
        None
    }

    /// Lowercase status key, when the entity has a status dimension.
    fn status_key(&self) -> Option<&str> {
        None
    }

    /// Calendar date used for month-window bucketing.
    fn calendar_date(&self) -> Option<NaiveDate> {
        None
    }
}

/// Filter specification over one snapshot.
///
/// Construct via [`FilterSpec::new`], which normalizes the `"all"` sentinel
/// and blank strings to "unconstrained".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    search_term: Option<String>,
    category: Option<String>,
    status: Option<String>,
    month_window: Option<MonthWindow>,
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty() && v != ALL)
}

impl FilterSpec {
    pub fn new(
        search_term: Option<String>,
        category: Option<String>,
        status: Option<String>,
        month_window: Option<MonthWindow>,
    ) -> Self {
        Self {
            search_term: normalize(search_term),
            category: normalize(category),
            status: normalize(status),
            month_window,
        }
    }

    /// True when every dimension is the all-sentinel; `apply` is then the
    /// identity on the snapshot.
    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.month_window.is_none()
    }

    /// Whether a single item passes every constrained dimension.
    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        if let Some(term) = &self.search_term {
            let hit = item
                .search_fields()
                .iter()
                .any(|f| f.to_lowercase().contains(term));
            if !hit {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if item.category_key() != Some(category.as_str()) {
                return false;
            }
        }

        if let Some(status) = &self.status {
            if item.status_key() != Some(status.as_str()) {
                return false;
            }
        }

        if let Some(window) = &self.month_window {
            match item.calendar_date() {
                Some(date) if window.contains(date) => {}
                _ => return false,
            }
        }

        true
    }

    /// Filters a snapshot. The result is always a subset of the input, in
    /// input order.
    pub fn apply<'a, T: Filterable>(&self, snapshot: &'a [T]) -> Vec<&'a T> {
        snapshot.iter().filter(|item| self.matches(*item)).collect()
    }
}

/// Counts items per key.
pub fn tally_by<T, K>(items: &[T], key: K) -> BTreeMap<String, usize>
where
    K: Fn(&T) -> String,
{
    let mut tally = BTreeMap::new();
    for item in items {
        *tally.entry(key(item)).or_insert(0) += 1;
    }
    tally
}

/// Sums a numeric projection over a snapshot.
pub fn sum_by<T, F>(items: &[T], f: F) -> u64
where
    F: Fn(&T) -> u64,
{
    items.iter().map(f).sum()
}

/// Arithmetic mean of a numeric projection; an empty snapshot averages to 0.
pub fn average_by<T, F>(items: &[T], f: F) -> f64
where
    F: Fn(&T) -> f64,
{
    if items.is_empty() {
        return 0.0;
    }
    items.iter().map(f).sum::<f64>() / items.len() as f64
}

/// Sorted, deduplicated list of a string projection.
pub fn distinct_values<T, F>(items: &[T], f: F) -> Vec<String>
where
    F: Fn(&T) -> Option<String>,
{
    let mut values: Vec<String> = items.iter().filter_map(f).collect();
    values.sort();
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        title: String,
        notes: String,
        category: &'static str,
        status: &'static str,
        date: NaiveDate,
        amount: u64,
    }

    impl Filterable for Item {
        fn search_fields(&self) -> Vec<&str> {
            vec![&self.title, &self.notes]
        }
        fn category_key(&self) -> Option<&str> {
            Some(self.category)
        }
        fn status_key(&self) -> Option<&str> {
            Some(self.status)
        }
        fn calendar_date(&self) -> Option<NaiveDate> {
            Some(self.date)
        }
    }

    fn item(title: &str, category: &'static str, status: &'static str, date: &str) -> Item {
        Item {
            title: title.to_string(),
            notes: String::new(),
            category,
            status,
            date: date.parse().unwrap(),
            amount: 10,
        }
    }

    fn snapshot() -> Vec<Item> {
        vec![
            item("Walking in Faith", "worship", "published", "2025-06-01"),
            item("The Power of Prayer", "worship", "draft", "2025-06-15"),
            item("Youth Retreat", "youth", "published", "2025-07-04"),
        ]
    }

    #[test]
    fn test_all_sentinel_is_identity() {
        let items = snapshot();
        let spec = FilterSpec::new(
            Some("all".to_string()),
            Some("all".to_string()),
            Some("all".to_string()),
            None,
        );
        assert!(spec.is_unconstrained());
        assert_eq!(spec.apply(&items).len(), items.len());
    }

    #[test]
    fn test_empty_search_term_matches_everything() {
        let items = snapshot();
        let spec = FilterSpec::new(Some("   ".to_string()), None, None, None);
        assert_eq!(spec.apply(&items).len(), items.len());
    }

    #[test]
    fn test_filter_result_is_subset_in_order() {
        let items = snapshot();
        let spec = FilterSpec::new(None, Some("worship".to_string()), None, None);
        let result = spec.apply(&items);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].title, "Walking in Faith");
        assert_eq!(result[1].title, "The Power of Prayer");
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let items = snapshot();
        let spec = FilterSpec::new(Some("FAITH".to_string()), None, None, None);
        let result = spec.apply(&items);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Walking in Faith");
    }

    #[test]
    fn test_search_faith_scenario() {
        // "faith" against "Walking in Faith" and "The Power of Prayer"
        // returns only the first.
        let items = vec![
            item("Walking in Faith", "worship", "published", "2025-06-01"),
            item("The Power of Prayer", "worship", "published", "2025-06-01"),
        ];
        let spec = FilterSpec::new(Some("faith".to_string()), None, None, None);
        let result = spec.apply(&items);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Walking in Faith");
    }

    #[test]
    fn test_dimensions_combine_conjunctively() {
        let items = snapshot();
        let spec = FilterSpec::new(
            None,
            Some("worship".to_string()),
            Some("draft".to_string()),
            None,
        );
        let result = spec.apply(&items);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "The Power of Prayer");
    }

    #[test]
    fn test_month_window_current_and_previous() {
        let items = snapshot();
        let today: NaiveDate = "2025-07-20".parse().unwrap();

        let this_month = FilterSpec::new(None, None, None, Some(MonthWindow::new(today, 0)));
        assert_eq!(this_month.apply(&items).len(), 1);

        let last_month = FilterSpec::new(None, None, None, Some(MonthWindow::new(today, -1)));
        assert_eq!(last_month.apply(&items).len(), 2);
    }

    #[test]
    fn test_month_window_crosses_year_boundary() {
        let today: NaiveDate = "2026-01-10".parse().unwrap();
        let window = MonthWindow::new(today, -1);
        assert!(window.contains("2025-12-31".parse().unwrap()));
        assert!(!window.contains("2026-01-01".parse().unwrap()));
    }

    #[test]
    fn test_tally_by() {
        let items = snapshot();
        let tally = tally_by(&items, |i| i.category.to_string());
        assert_eq!(tally.get("worship"), Some(&2));
        assert_eq!(tally.get("youth"), Some(&1));
    }

    #[test]
    fn test_sum_and_average() {
        let items = snapshot();
        assert_eq!(sum_by(&items, |i| i.amount), 30);
        assert_eq!(average_by(&items, |i| i.amount as f64), 10.0);
    }

    #[test]
    fn test_average_of_empty_snapshot_is_zero() {
        let items: Vec<Item> = Vec::new();
        let avg = average_by(&items, |i| i.amount as f64);
        assert_eq!(avg, 0.0);
        assert!(!avg.is_nan());
    }

    #[test]
    fn test_distinct_values_sorted_deduped() {
        let items = snapshot();
        let categories = distinct_values(&items, |i| Some(i.category.to_string()));
        assert_eq!(categories, vec!["worship".to_string(), "youth".to_string()].as_slice());
    }
}
