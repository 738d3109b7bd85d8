//! Filtering and sorting of loaded rows.
//!
//! Multi-select filter options come from the distinct values of the rows
//! currently loaded, not from the full data set on the server.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Row type a `DataTable` can show
pub trait Tabular: Clone + Send + Sync + 'static {
    fn row_id(&self) -> String;

    /// Display text of a column, also the value filters match on
    fn cell(&self, key: &str) -> String;

    fn compare_by_field(&self, other: &Self, key: &str) -> Ordering {
        compare_text(&self.cell(key), &other.cell(key))
    }
}

/// Numbers compare numerically and sort before text; text compares
/// case-insensitively, then by raw value. The order is total, so mixed
/// columns such as order numbers are safe to sort.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    let parse = |s: &str| {
        s.replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
    };
    match (parse(a), parse(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub multi_select: bool,
    pub numeric: bool,
}

impl Column {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: false,
            multi_select: false,
            numeric: false,
        }
    }

    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub const fn multi_select(mut self) -> Self {
        self.multi_select = true;
        self
    }

    pub const fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    /// Sorted column and whether ascending
    pub sort: Option<(String, bool)>,
    /// Selected values per multi-select column
    pub filters: BTreeMap<String, BTreeSet<String>>,
}

impl TableState {
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort = match self.sort.take() {
            Some((current, ascending)) if current == key => Some((current, !ascending)),
            _ => Some((key.to_string(), true)),
        };
    }

    pub fn toggle_filter_value(&mut self, key: &str, value: &str) {
        let selected = self.filters.entry(key.to_string()).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        if selected.is_empty() {
            self.filters.remove(key);
        }
    }

    pub fn is_selected(&self, key: &str, value: &str) -> bool {
        self.filters.get(key).is_some_and(|s| s.contains(value))
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn active_filters(&self) -> usize {
        self.filters.len()
    }

    pub fn sort_indicator(&self, key: &str) -> &'static str {
        match &self.sort {
            Some((current, true)) if current == key => " ▲",
            Some((current, false)) if current == key => " ▼",
            _ => " ⇅",
        }
    }
}

/// Distinct values of a column among the loaded rows, sorted
pub fn filter_options<R: Tabular>(rows: &[R], key: &str) -> Vec<String> {
    let values: BTreeSet<String> = rows
        .iter()
        .map(|r| r.cell(key))
        .filter(|v| !v.is_empty())
        .collect();
    let mut values: Vec<String> = values.into_iter().collect();
    values.sort_by(|a, b| compare_text(a, b));
    values
}

/// Filter, then sort
pub fn apply<R: Tabular>(rows: &[R], state: &TableState) -> Vec<R> {
    let mut visible: Vec<R> = rows
        .iter()
        .filter(|row| {
            state
                .filters
                .iter()
                .all(|(key, selected)| selected.contains(&row.cell(key)))
        })
        .cloned()
        .collect();

    if let Some((key, ascending)) = &state.sort {
        visible.sort_by(|a, b| {
            let cmp = a.compare_by_field(b, key);
            if *ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });
    }
    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: &'static str,
        city: &'static str,
        target: f64,
    }

    impl Tabular for Row {
        fn row_id(&self) -> String {
            self.id.to_string()
        }

        fn cell(&self, key: &str) -> String {
            match key {
                "city" => self.city.to_string(),
                "target" => self.target.to_string(),
                _ => String::new(),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: "1", city: "Lahore", target: 900.0 },
            Row { id: "2", city: "Karachi", target: 1200.0 },
            Row { id: "3", city: "Lahore", target: 80.0 },
        ]
    }

    #[test]
    fn test_options_come_from_loaded_rows() {
        assert_eq!(filter_options(&rows(), "city"), vec!["Karachi", "Lahore"]);
        assert!(filter_options::<Row>(&[], "city").is_empty());
    }

    #[test]
    fn test_filter_then_sort() {
        let mut state = TableState::default();
        state.toggle_filter_value("city", "Lahore");
        state.toggle_sort("target");

        let ids: Vec<&str> = apply(&rows(), &state).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["3", "1"]);

        state.toggle_sort("target");
        let ids: Vec<&str> = apply(&rows(), &state).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(state.sort_indicator("target"), " ▼");
        assert_eq!(state.sort_indicator("city"), " ⇅");
    }

    #[test]
    fn test_deselecting_last_value_removes_filter() {
        let mut state = TableState::default();
        state.toggle_filter_value("city", "Karachi");
        assert_eq!(state.active_filters(), 1);
        assert!(state.is_selected("city", "Karachi"));

        state.toggle_filter_value("city", "Karachi");
        assert_eq!(state.active_filters(), 0);
        assert_eq!(apply(&rows(), &state).len(), 3);
    }

    #[test]
    fn test_numeric_compare() {
        assert_eq!(compare_text("80", "1,200"), Ordering::Less);
        assert_eq!(compare_text("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_text("Lahore", "lahore"), Ordering::Less);
    }

    #[test]
    fn test_mixed_column_order_is_consistent() {
        assert_eq!(compare_text("9", "10"), Ordering::Less);
        assert_eq!(compare_text("10", "1a"), Ordering::Less);
        assert_eq!(compare_text("9", "1a"), Ordering::Less);
        assert_eq!(compare_text("NaN", "5"), Ordering::Greater);
    }

    #[derive(Debug, Clone, PartialEq)]
    struct OrderRow {
        id: String,
    }

    impl Tabular for OrderRow {
        fn row_id(&self) -> String {
            self.id.clone()
        }

        fn cell(&self, _key: &str) -> String {
            self.id.clone()
        }
    }

    #[test]
    fn test_sorting_mixed_order_numbers() {
        let samples = ["9", "10", "1a", "ORD-7", "100", "b2", "0042", "1,5"];
        let rows: Vec<OrderRow> = (0..200)
            .map(|i| OrderRow {
                id: format!("{}{}", samples[i % samples.len()], "x".repeat(i % 3)),
            })
            .chain(samples.iter().map(|s| OrderRow { id: s.to_string() }))
            .collect();

        let mut state = TableState::default();
        state.toggle_sort("no");
        let ascending = apply(&rows, &state);
        assert_eq!(ascending.len(), rows.len());
        for pair in ascending.windows(2) {
            assert_ne!(compare_text(&pair[0].id, &pair[1].id), Ordering::Greater);
        }
        assert_eq!(ascending[0].id, "9");

        state.toggle_sort("no");
        let descending = apply(&rows, &state);
        assert_eq!(descending.first(), ascending.last());

        let options = filter_options(&rows, "no");
        assert_eq!(&options[..5], &["9", "10", "1,5", "0042", "100"]);
    }
}
