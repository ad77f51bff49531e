//! Query state for a paginated, filterable list.
//!
//! The reducer is deliberately free of any rendering or fetching concern:
//! setters report whether the state actually changed, and the list
//! controller only schedules a fetch on a reported change.

/// Fixed page size for every paginated list.
pub const PAGE_SIZE: u32 = 10;

/// The committed query of one list view. `page` is 1-based and never 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    search: String,
    category: String,
    page: u32,
}

/// Parameters of one list request, derived from a `ListQuery` snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub search: String,
    pub category: String,
    pub limit: u32,
    pub offset: u64,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            search: String::new(),
            category: String::new(),
            page: 1,
        }
    }
}

impl ListQuery {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Changing the search text always starts over from page 1.
    pub fn set_search(&mut self, search: String) -> bool {
        if self.search == search {
            return false;
        }
        self.search = search;
        self.page = 1;
        true
    }

    /// Changing the category filter always starts over from page 1.
    pub fn set_category(&mut self, category: String) -> bool {
        if self.category == category {
            return false;
        }
        self.category = category;
        self.page = 1;
        true
    }

    /// Accepts a page change only when it stays inside `1..=last_page(total)`.
    /// Going backwards is always allowed down to page 1, so a shrunken result
    /// set cannot strand the user on an unreachable page.
    pub fn set_page(&mut self, page: u32, total: u64) -> bool {
        if page < 1 || page == self.page {
            return false;
        }
        if page > self.page && u64::from(page - 1) * u64::from(PAGE_SIZE) >= total {
            return false;
        }
        self.page = page;
        true
    }

    pub fn params(&self) -> ListParams {
        ListParams {
            search: self.search.clone(),
            category: self.category.clone(),
            limit: PAGE_SIZE,
            offset: u64::from(self.page - 1) * u64::from(PAGE_SIZE),
        }
    }

    pub fn has_next_page(&self, total: u64) -> bool {
        u64::from(self.page) * u64::from(PAGE_SIZE) < total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_compose_offset_from_page() {
        let mut query = ListQuery::default();
        assert_eq!(query.params().offset, 0);
        assert_eq!(query.params().limit, PAGE_SIZE);

        assert!(query.set_page(3, 100));
        let params = query.params();
        assert_eq!(params.offset, 20);
        assert_eq!(params.limit, PAGE_SIZE);
    }

    #[test]
    fn search_change_resets_page() {
        let mut query = ListQuery::default();
        query.set_page(3, 100);

        assert!(query.set_search("ball".into()));
        assert_eq!(query.page(), 1);
        assert_eq!(query.params().offset, 0);
    }

    #[test]
    fn category_change_resets_page() {
        let mut query = ListQuery::default();
        query.set_page(2, 100);

        assert!(query.set_category("Cricket".into()));
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn unchanged_filter_is_a_no_op() {
        let mut query = ListQuery::default();
        query.set_search("bat".into());
        query.set_page(2, 100);

        assert!(!query.set_search("bat".into()));
        assert!(!query.set_category(String::new()));
        assert_eq!(query.page(), 2);
    }

    #[test]
    fn page_zero_and_same_page_are_rejected() {
        let mut query = ListQuery::default();
        assert!(!query.set_page(0, 100));
        assert!(!query.set_page(1, 100));
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn page_past_total_is_rejected() {
        let mut query = ListQuery::default();
        // 10 records fit on one page.
        assert!(!query.set_page(2, 10));
        assert_eq!(query.page(), 1);

        // 11 records spill onto a second page.
        assert!(query.set_page(2, 11));
        assert_eq!(query.page(), 2);
        assert!(!query.set_page(3, 11));
    }

    #[test]
    fn going_back_is_always_allowed() {
        let mut query = ListQuery::default();
        query.set_page(3, 100);
        // Total shrank meanwhile; backwards navigation must still work.
        assert!(query.set_page(2, 0));
        assert_eq!(query.page(), 2);
    }

    #[test]
    fn next_page_availability() {
        let query = ListQuery::default();
        assert!(!query.has_next_page(10));
        assert!(query.has_next_page(11));
    }
}
