//! Pagination Utilities
//!
//! One paginated collection for every list page:
//! `collection.filter(predicate).slice(start, start + page_size)`.

use chrono::NaiveDate;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::models::Record;

/// Rows of one page plus the numbers the pager reports
#[derive(Debug, Clone, PartialEq)]
pub struct PageWindow<T> {
    pub rows: Vec<T>,
    /// 1-based, already clamped
    pub page: usize,
    pub total_pages: usize,
    /// 1-based index of the first row shown, 0 when nothing matches
    pub start: usize,
    /// 1-based index of the last row shown
    pub end: usize,
    /// Number of matching rows
    pub total: usize,
}

/// Number of pages needed for `total` rows; never less than 1
pub fn total_pages(total: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    total.div_ceil(size).max(1)
}

/// Filter then slice to the requested page window. Out-of-range pages are clamped.
pub fn paginate<T, P>(items: &[T], predicate: P, page: usize, page_size: usize) -> PageWindow<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    let size = page_size.max(1);
    let matches: Vec<&T> = items.iter().filter(|&item| predicate(item)).collect();
    let total = matches.len();
    let pages = total_pages(total, size);
    let page = page.clamp(1, pages);

    let offset = (page - 1) * size;
    let rows: Vec<T> = matches.into_iter().skip(offset).take(size).cloned().collect();
    let (start, end) = if rows.is_empty() { (0, 0) } else { (offset + 1, offset + rows.len()) };

    PageWindow { rows, page, total_pages: pages, start, end, total }
}

/// Search box, filters and page position of one list page
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub search: String,
    pub category: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            category: None,
            date_from: None,
            date_to: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    // Any change to what is shown sends the user back to page 1

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category.filter(|c| !c.is_empty());
        self.page = 1;
    }

    pub fn set_date_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.date_from = from;
        self.date_to = to;
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        *self = Self::new(self.page_size);
    }

    /// Move to `page` if it exists; otherwise stay put
    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        if (1..=total_pages.max(1)).contains(&page) {
            self.page = page;
        }
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.go_to(self.page + 1, total_pages);
    }

    pub fn prev_page(&mut self, total_pages: usize) {
        if self.page > 1 {
            self.go_to(self.page - 1, total_pages);
        }
    }

    /// Case-insensitive search plus category and inclusive date range
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() && !record.search_text().to_lowercase().contains(&needle) {
            return false;
        }
        if let Some(category) = &self.category {
            if record.category().as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(date) = record.date() else { return false };
            if self.date_from.is_some_and(|from| date < from) {
                return false;
            }
            if self.date_to.is_some_and(|to| date > to) {
                return false;
            }
        }
        true
    }

    pub fn apply<R: Record>(&self, records: &[R]) -> PageWindow<R> {
        paginate(records, |r| self.matches(r), self.page, self.page_size)
    }
}

/// Distinct category values, sorted, for the filter dropdown
pub fn category_options<R: Record>(records: &[R]) -> Vec<String> {
    let mut options: Vec<String> = records.iter().filter_map(|r| r.category()).collect();
    options.sort();
    options.dedup();
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Draft;
    use crate::models::Customer;

    fn customer(i: usize, company: &str, since: &str) -> Customer {
        let draft = Draft::blank(Customer::fields())
            .with("name", format!("Customer {}", i))
            .with("email", format!("c{}@mail.io", i))
            .with("company", company)
            .with("customerType", if i % 2 == 0 { "business" } else { "individual" });
        let mut c = Customer::from_draft(&i.to_string(), &draft).unwrap();
        c.created_at = crate::form::parse_date(since);
        c
    }

    fn twelve_customers() -> Vec<Customer> {
        (1..=12)
            .map(|i| {
                let company = if i % 4 == 0 { "Globex" } else { "Initech" };
                customer(i, company, &format!("2024-01-{:02}", i))
            })
            .collect()
    }

    #[test]
    fn test_search_three_of_twelve() {
        let customers = twelve_customers();
        let mut query = ListQuery::new(10);
        query.set_search("GLOBEX");

        let window = query.apply(&customers);
        assert_eq!(window.rows.len(), 3);
        assert_eq!((window.start, window.end, window.total), (1, 3, 3));
        assert_eq!(window.total_pages, 1);

        // Only one page: moving forward is a no-op
        query.next_page(window.total_pages);
        assert_eq!(query.page, 1);
        query.go_to(5, window.total_pages);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_second_page_window() {
        let customers = twelve_customers();
        let mut query = ListQuery::new(10);
        let first = query.apply(&customers);
        assert_eq!((first.start, first.end, first.total, first.total_pages), (1, 10, 12, 2));

        query.next_page(first.total_pages);
        let second = query.apply(&customers);
        assert_eq!(second.page, 2);
        assert_eq!((second.start, second.end), (11, 12));
        assert_eq!(second.rows[0].id, "11");

        query.next_page(second.total_pages);
        assert_eq!(query.page, 2);
        query.prev_page(second.total_pages);
        query.prev_page(second.total_pages);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_changes_reset_page() {
        let mut query = ListQuery::new(5);
        query.go_to(3, 3);
        query.set_search("x");
        assert_eq!(query.page, 1);

        query.go_to(2, 3);
        query.set_page_size(25);
        assert_eq!((query.page, query.page_size), (1, 25));

        query.go_to(2, 3);
        query.set_category(Some("Business".into()));
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_stale_page_is_clamped() {
        let items: Vec<u32> = (1..=4).collect();
        let window = paginate(&items, |_| true, 9, 3);
        assert_eq!(window.page, 2);
        assert_eq!(window.rows, vec![4]);
        assert_eq!((window.start, window.end), (4, 4));
    }

    #[test]
    fn test_empty_result() {
        let window = paginate(&[1u8, 2, 3], |_| false, 1, 10);
        assert_eq!((window.start, window.end, window.total, window.total_pages), (0, 0, 0, 1));
        assert!(window.rows.is_empty());
    }

    #[test]
    fn test_category_and_date_filters() {
        let customers = twelve_customers();
        let mut query = ListQuery::new(50);
        query.set_category(Some("Business".into()));
        assert_eq!(query.apply(&customers).total, 6);

        query.set_date_range(crate::form::parse_date("2024-01-03"), crate::form::parse_date("2024-01-08"));
        let ids: Vec<String> = query.apply(&customers).rows.into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["4", "6", "8"]);

        query.clear_filters();
        assert_eq!(query.apply(&customers).total, 12);
        assert_eq!(query.page_size, 50);
    }

    #[test]
    fn test_category_options_sorted_unique() {
        let customers = twelve_customers();
        assert_eq!(category_options(&customers), vec!["Business".to_string(), "Individual".to_string()]);
    }
}
