//! Client-side filtering over the rows already fetched for a screen.
//!
//! Three predicates, combined with AND:
//! - text: case-insensitive substring over [`Searchable::search_fields`], OR across fields;
//! - category: exact match on [`Searchable::category_label`];
//! - date range: [`Searchable::filter_date`] truncated to `YYYY-MM-DD`, inclusive bounds.
//!
//! Filtering never reorders: the result is a subsequence of the input.

use std::borrow::Cow;

use chrono::NaiveDate;
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A record type the table can search.
pub trait Searchable {
    /// Stringified fields matched by the free-text query.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    /// Label matched by the category selector, if the screen has one.
    fn category_label(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// Raw date string (`YYYY-MM-DD`, optionally followed by a time).
    fn filter_date(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("'{0}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: String, end: String },
}

/// Date-only portion of a date or datetime string.
pub fn date_part(raw: &str) -> &str {
    let raw = raw.trim();
    let cut = raw.find(['T', ' ']).unwrap_or(raw.len()).min(10);
    raw.get(..cut).unwrap_or(raw)
}

fn parse_bound(raw: &str) -> Result<Option<String>, FilterError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(|date| Some(date.format(DATE_FORMAT).to_string()))
        .map_err(|_| FilterError::InvalidDate(raw.to_owned()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    query: String,
    category: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl FilterState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    pub fn end_date(&self) -> Option<&str> {
        self.end_date.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns whether the state changed.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if self.query == query {
            return false;
        }
        self.query = query;
        true
    }

    /// `None` or an empty label clears the category.
    pub fn set_category(&mut self, category: Option<String>) -> bool {
        let category = category.filter(|c| !c.is_empty());
        if self.category == category {
            return false;
        }
        self.category = category;
        true
    }

    /// An empty string clears the bound. Rejected values leave the state unchanged.
    pub fn set_start_date(&mut self, raw: &str) -> Result<bool, FilterError> {
        let start = parse_bound(raw)?;
        if let (Some(start), Some(end)) = (&start, &self.end_date)
            && end < start
        {
            return Err(FilterError::EndBeforeStart {
                start: start.clone(),
                end: end.clone(),
            });
        }
        if self.start_date == start {
            return Ok(false);
        }
        self.start_date = start;
        Ok(true)
    }

    /// An empty string clears the bound. Rejected values leave the state unchanged.
    pub fn set_end_date(&mut self, raw: &str) -> Result<bool, FilterError> {
        let end = parse_bound(raw)?;
        if let (Some(start), Some(end)) = (&self.start_date, &end)
            && end < start
        {
            return Err(FilterError::EndBeforeStart {
                start: start.clone(),
                end: end.clone(),
            });
        }
        if self.end_date == end {
            return Ok(false);
        }
        self.end_date = end;
        Ok(true)
    }

    pub fn clear(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        *self = Self::default();
        true
    }

    pub fn matches<T: Searchable>(&self, record: &T) -> bool {
        self.matches_text(record) && self.matches_category(record) && self.matches_dates(record)
    }

    pub fn apply<'a, T: Searchable>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }

    fn matches_text<T: Searchable>(&self, record: &T) -> bool {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_category<T: Searchable>(&self, record: &T) -> bool {
        match &self.category {
            None => true,
            Some(wanted) => record
                .category_label()
                .is_some_and(|label| label.as_ref() == wanted),
        }
    }

    fn matches_dates<T: Searchable>(&self, record: &T) -> bool {
        if self.start_date.is_none() && self.end_date.is_none() {
            return true;
        }
        let Some(date) = record.filter_date().map(date_part).filter(|d| !d.is_empty()) else {
            return false;
        };
        let after_start = self.start_date.as_deref().is_none_or(|start| date >= start);
        let before_end = self.end_date.as_deref().is_none_or(|end| date <= end);
        after_start && before_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        mobile: &'static str,
        kind: &'static str,
        date: Option<&'static str>,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<Cow<'_, str>> {
            vec![Cow::Borrowed(self.name), Cow::Borrowed(self.mobile)]
        }

        fn category_label(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.kind))
        }

        fn filter_date(&self) -> Option<&str> {
            self.date
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "Asha Rao",
                mobile: "9000000001",
                kind: "Owner",
                date: Some("2024-03-01T10:00:00Z"),
            },
            Row {
                name: "Vikram Shah",
                mobile: "9000000002",
                kind: "Agent",
                date: Some("2024-03-05 08:30:00"),
            },
            Row {
                name: "Meera Iyer",
                mobile: "9000000003",
                kind: "Owner",
                date: Some("2024-03-10"),
            },
            Row {
                name: "Rahul Das",
                mobile: "9000000004",
                kind: "Builder",
                date: None,
            },
        ]
    }

    fn names<'a>(rows: &[&'a Row]) -> Vec<&'a str> {
        rows.iter().map(|r| r.name).collect()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let data = rows();
        assert_eq!(FilterState::default().apply(&data).len(), data.len());
    }

    #[test]
    fn text_is_case_insensitive_and_ors_fields() {
        let data = rows();
        let mut filter = FilterState::default();
        filter.set_query("  MEERA ");
        assert_eq!(names(&filter.apply(&data)), vec!["Meera Iyer"]);

        filter.set_query("0002");
        assert_eq!(names(&filter.apply(&data)), vec!["Vikram Shah"]);
    }

    #[test]
    fn category_is_exact() {
        let data = rows();
        let mut filter = FilterState::default();
        filter.set_category(Some("Owner".to_owned()));
        assert_eq!(names(&filter.apply(&data)), vec!["Asha Rao", "Meera Iyer"]);

        filter.set_category(Some("Own".to_owned()));
        assert!(filter.apply(&data).is_empty());
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let data = rows();
        let mut filter = FilterState::default();
        filter.set_start_date("2024-03-01").unwrap();
        filter.set_end_date("2024-03-05").unwrap();
        assert_eq!(names(&filter.apply(&data)), vec!["Asha Rao", "Vikram Shah"]);
    }

    #[test]
    fn missing_date_fails_when_any_bound_is_set() {
        let data = rows();
        let mut filter = FilterState::default();
        filter.set_end_date("2030-01-01").unwrap();
        assert!(!names(&filter.apply(&data)).contains(&"Rahul Das"));
    }

    #[test]
    fn predicates_combine_with_and() {
        let data = rows();
        let mut filter = FilterState::default();
        filter.set_category(Some("Owner".to_owned()));
        filter.set_query("rao");
        filter.set_start_date("2024-03-02").unwrap();
        assert!(filter.apply(&data).is_empty());
    }

    #[test]
    fn end_before_start_is_rejected_without_change() {
        let mut filter = FilterState::default();
        filter.set_start_date("2024-03-10").unwrap();
        let before = filter.clone();

        let err = filter.set_end_date("2024-03-01").unwrap_err();
        assert_eq!(
            err,
            FilterError::EndBeforeStart {
                start: "2024-03-10".to_owned(),
                end: "2024-03-01".to_owned(),
            }
        );
        assert_eq!(filter, before);
    }

    #[test]
    fn start_after_end_is_rejected() {
        let mut filter = FilterState::default();
        filter.set_end_date("2024-03-01").unwrap();
        assert!(filter.set_start_date("2024-04-01").is_err());
        assert_eq!(filter.start_date(), None);
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let mut filter = FilterState::default();
        assert_eq!(
            filter.set_start_date("03/01/2024"),
            Err(FilterError::InvalidDate("03/01/2024".to_owned()))
        );
        assert!(filter.set_end_date("2024-02-30").is_err());
        assert!(filter.is_empty());
    }

    #[test]
    fn empty_date_clears_the_bound() {
        let mut filter = FilterState::default();
        filter.set_start_date("2024-03-01").unwrap();
        assert_eq!(filter.set_start_date(""), Ok(true));
        assert_eq!(filter.start_date(), None);
    }

    #[test]
    fn setters_report_whether_anything_changed() {
        let mut filter = FilterState::default();
        assert!(filter.set_query("a"));
        assert!(!filter.set_query("a"));
        assert!(!filter.set_category(Some(String::new())));
        assert!(filter.clear());
        assert!(!filter.clear());
    }

    #[test]
    fn result_is_an_ordered_subsequence() {
        let data = rows();
        let mut filter = FilterState::default();
        filter.set_query("9000");
        let filtered = filter.apply(&data);

        let mut source = data.iter();
        for row in filtered {
            assert!(source.any(|candidate| candidate == row), "order not preserved");
        }
    }

    #[test]
    fn date_part_handles_datetimes() {
        assert_eq!(date_part("2024-03-05T09:00:00Z"), "2024-03-05");
        assert_eq!(date_part("2024-03-05 09:00"), "2024-03-05");
        assert_eq!(date_part("2024-03-05"), "2024-03-05");
        assert_eq!(date_part(""), "");
    }
}
