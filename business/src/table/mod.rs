//! The reusable table engine behind every listing screen.
//!
//! `DataTable<T>` composes the client-side [`FilterState`], the [`Paginator`], the
//! per-row [`ActionMenu`] and the [`RefreshTrigger`]. It holds no rows; callers pass the
//! fetched collection to [`DataTable::view`] each frame.

mod actions;
mod filter;
mod paginator;
mod refresh;

use std::marker::PhantomData;

pub use actions::{ActionMenu, Dispatch, RowAction};
pub use filter::{FilterError, FilterState, Searchable, date_part};
pub use paginator::{PageItem, Paginator, page_window};
pub use refresh::{FetchGate, RefreshTrigger};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    pub page_size: usize,
    pub window: usize,
}

impl TableConfig {
    /// Listings, leads and subscriptions.
    pub const COMPACT: Self = Self {
        page_size: 10,
        window: 5,
    };

    /// Property links and places.
    pub const WIDE: Self = Self {
        page_size: 20,
        window: 7,
    };
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::COMPACT
    }
}

/// What the table shows for one frame.
#[derive(Debug)]
pub struct TableView<'a, T> {
    pub rows: Vec<&'a T>,
    pub page_items: Vec<PageItem>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_filtered: usize,
    /// 1-based number of the first row on the page, for the serial-number column.
    pub first_row_number: usize,
}

#[derive(Debug)]
pub struct DataTable<T> {
    config: TableConfig,
    filter: FilterState,
    paginator: Paginator,
    menu: ActionMenu,
    refresh: RefreshTrigger,
    _rows: PhantomData<fn() -> T>,
}

impl<T> Clone for DataTable<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            filter: self.filter.clone(),
            paginator: self.paginator.clone(),
            menu: self.menu,
            refresh: self.refresh,
            _rows: PhantomData,
        }
    }
}

impl<T: Searchable> DataTable<T> {
    pub fn new(config: TableConfig) -> Self {
        Self {
            config,
            filter: FilterState::default(),
            paginator: Paginator::new(config.page_size, config.window),
            menu: ActionMenu::default(),
            refresh: RefreshTrigger::default(),
            _rows: PhantomData,
        }
    }

    pub fn config(&self) -> TableConfig {
        self.config
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn menu(&self) -> &ActionMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut ActionMenu {
        &mut self.menu
    }

    pub fn refresh_trigger(&self) -> RefreshTrigger {
        self.refresh
    }

    /// Request a re-fetch at the same filters.
    pub fn request_refresh(&mut self) {
        self.refresh.bump();
    }

    fn filter_changed(&mut self, changed: bool) -> bool {
        if changed {
            self.paginator.reset();
        }
        changed
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let changed = self.filter.set_query(query);
        self.filter_changed(changed)
    }

    pub fn set_category(&mut self, category: Option<String>) -> bool {
        let changed = self.filter.set_category(category);
        self.filter_changed(changed)
    }

    pub fn set_start_date(&mut self, raw: &str) -> Result<bool, FilterError> {
        let changed = self.filter.set_start_date(raw)?;
        Ok(self.filter_changed(changed))
    }

    pub fn set_end_date(&mut self, raw: &str) -> Result<bool, FilterError> {
        let changed = self.filter.set_end_date(raw)?;
        Ok(self.filter_changed(changed))
    }

    pub fn clear_filters(&mut self) -> bool {
        let changed = self.filter.clear();
        self.filter_changed(changed)
    }

    pub fn go_to_page(&mut self, page: usize, rows: &[T]) {
        let total = self.filtered_len(rows);
        self.paginator.go_to(page, total);
    }

    /// New data arrived at unchanged filters: keep the page, clamp it.
    pub fn on_data_refreshed(&mut self, rows: &[T]) {
        let total = self.filtered_len(rows);
        self.paginator.clamp(total);
    }

    fn filtered_len(&self, rows: &[T]) -> usize {
        rows.iter().filter(|r| self.filter.matches(*r)).count()
    }

    pub fn view<'a>(&self, rows: &'a [T]) -> TableView<'a, T> {
        let filtered = self.filter.apply(rows);
        let total_filtered = filtered.len();
        let total_pages = self.paginator.total_pages(total_filtered);
        let current_page = self.paginator.current_page().clamp(1, total_pages);
        let bounds = self.paginator.page_bounds(total_filtered);
        let first_row_number = bounds.start + 1;
        let rows = filtered
            .into_iter()
            .skip(bounds.start)
            .take(bounds.len())
            .collect();

        TableView {
            rows,
            page_items: page_window(total_pages, current_page, self.config.window),
            current_page,
            total_pages,
            total_filtered,
            first_row_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: String,
        date: String,
    }

    impl Searchable for Item {
        fn search_fields(&self) -> Vec<Cow<'_, str>> {
            vec![Cow::Borrowed(self.name.as_str())]
        }

        fn filter_date(&self) -> Option<&str> {
            Some(&self.date)
        }
    }

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item {
                name: if i % 2 == 0 {
                    format!("even {i}")
                } else {
                    format!("odd {i}")
                },
                date: format!("2024-01-{:02}", i % 28 + 1),
            })
            .collect()
    }

    #[test]
    fn every_filter_edit_resets_the_page() {
        let rows = items(100);
        let mut table = DataTable::<Item>::new(TableConfig::COMPACT);

        table.go_to_page(4, &rows);
        assert!(table.set_query("even"));
        assert_eq!(table.paginator().current_page(), 1);

        table.go_to_page(3, &rows);
        table.set_start_date("2024-01-02").unwrap();
        assert_eq!(table.paginator().current_page(), 1);

        table.go_to_page(2, &rows);
        table.set_end_date("2024-01-20").unwrap();
        assert_eq!(table.paginator().current_page(), 1);

        table.go_to_page(2, &rows);
        table.set_category(Some("x".to_owned()));
        assert_eq!(table.paginator().current_page(), 1);

        table.go_to_page(2, &rows);
        table.clear_filters();
        assert_eq!(table.paginator().current_page(), 1);
    }

    #[test]
    fn unchanged_filter_keeps_the_page() {
        let rows = items(100);
        let mut table = DataTable::<Item>::new(TableConfig::COMPACT);
        table.go_to_page(5, &rows);
        assert!(!table.set_query(""));
        assert_eq!(table.paginator().current_page(), 5);
    }

    #[test]
    fn refresh_clamps_but_keeps_page() {
        let mut table = DataTable::<Item>::new(TableConfig::COMPACT);
        table.go_to_page(5, &items(100));
        table.on_data_refreshed(&items(60));
        assert_eq!(table.paginator().current_page(), 5);
        table.on_data_refreshed(&items(25));
        assert_eq!(table.paginator().current_page(), 3);
    }

    #[test]
    fn view_slices_the_filtered_rows() {
        let rows = items(45);
        let mut table = DataTable::<Item>::new(TableConfig::COMPACT);
        table.set_query("odd");
        table.go_to_page(3, &rows);

        let view = table.view(&rows);
        assert_eq!(view.total_filtered, 22);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.current_page, 3);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.first_row_number, 21);
        assert_eq!(view.rows[0].name, "odd 41");
    }

    #[test]
    fn empty_view_is_page_one_of_one() {
        let table = DataTable::<Item>::new(TableConfig::WIDE);
        let view = table.view(&[]);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.current_page, 1);
        assert!(view.rows.is_empty());
        assert_eq!(view.page_items, vec![PageItem::Page(1)]);
    }

    #[test]
    fn rejected_date_keeps_page_and_filter() {
        let rows = items(100);
        let mut table = DataTable::<Item>::new(TableConfig::COMPACT);
        table.set_start_date("2024-01-10").unwrap();
        table.go_to_page(2, &rows);
        assert!(table.set_end_date("2024-01-01").is_err());
        assert_eq!(table.paginator().current_page(), 2);
        assert_eq!(table.filter().end_date(), None);
    }
}
