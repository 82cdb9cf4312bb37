use derive_getters::Getters;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 5;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// `asc` sorts by ascending name, any other value by descending name.
    /// No value, or a blank one, keeps the insertion order.
    pub fn from_query(sort: Option<&str>) -> Option<Self> {
        match sort.map(str::trim) {
            None | Some("") => None,
            Some("asc") => Some(SortDirection::Ascending),
            Some(_) => Some(SortDirection::Descending),
        }
    }
}

#[derive(Debug, Getters, PartialEq, Eq, Clone)]
pub struct PageRequest {
    name_filter: Option<String>,
    page: u32,
    page_size: u32,
    sort: Option<SortDirection>,
}

impl PageRequest {
    /// Missing values fall back to defaults. Page and page size are at least 1.
    pub fn new(
        name_filter: Option<String>,
        page: Option<u32>,
        page_size: Option<u32>,
        sort: Option<SortDirection>,
    ) -> Self {
        Self {
            name_filter: name_filter.filter(|name| !name.trim().is_empty()),
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1),
            sort,
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

/// Where a page stands among the others.
#[derive(Debug, Getters, PartialEq, Eq, Clone, Copy)]
pub struct PageInfo {
    page: u32,
    total_pages: u32,
    has_prev_page: bool,
    has_next_page: bool,
    prev_page: Option<u32>,
    next_page: Option<u32>,
}

impl PageInfo {
    /// There is always at least one page, even when there is nothing to show.
    pub fn new(total_items: u64, page: u32, page_size: u32) -> Self {
        let page_size = u64::from(page_size.max(1));
        let total_pages = u32::try_from(total_items.div_ceil(page_size))
            .unwrap_or(u32::MAX)
            .max(1);
        let has_prev_page = page > 1;
        let has_next_page = page < total_pages;

        Self {
            page,
            total_pages,
            has_prev_page,
            has_next_page,
            prev_page: has_prev_page.then(|| page - 1),
            next_page: has_next_page.then(|| page + 1),
        }
    }
}
