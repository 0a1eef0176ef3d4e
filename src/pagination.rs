//! This modules defines the common functionality for paging data.

use maud::{Markup, html};

use crate::{
    dashboard::{FILTERS_FORM_ID, TRANSACTIONS_SECTION_ID},
    endpoints::{self, format_endpoint},
};

/// The number of transactions shown per page.
pub const ITEMS_PER_PAGE: u64 = 10;

/// The ID of the pagination element.
pub const PAGINATION_ID: &str = "pagination";

/// How many pages either side of the current page are linked directly.
const PAGE_WINDOW: u64 = 2;

/// Where the user is in the transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// The 1-based page being shown.
    pub current_page: u64,
    pub items_per_page: u64,
    /// The number of matching transactions reported by the last response.
    pub total_items: u64,
}

impl PageState {
    pub fn new(items_per_page: u64) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_items: 0,
        }
    }

    /// The number of pages needed to show every matching transaction.
    pub fn page_count(&self) -> u64 {
        self.total_items.div_ceil(self.items_per_page)
    }

    /// Whether `page` is one of the pages of the last response.
    pub fn contains(&self, page: u64) -> bool {
        (1..=self.page_count()).contains(&page)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(ITEMS_PER_PAGE)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    Page(u64),
    CurrPage(u64),
    Ellipsis,
    /// The page to go to, or `None` when already on the last page.
    NextButton(Option<u64>),
    /// The page to go to, or `None` when already on the first page.
    BackButton(Option<u64>),
}

/// Lists the controls for moving between `page_count` pages.
///
/// The first page, the last page and the pages within two of the current page
/// are always shown. An ellipsis stands in for the page three away from the
/// current page when that page is not shown itself. Nothing is shown when
/// there is at most one page.
pub fn create_pagination_indicators(curr_page: u64, page_count: u64) -> Vec<PaginationIndicator> {
    if page_count <= 1 {
        return Vec::new();
    }

    let mut indicators = vec![PaginationIndicator::BackButton(
        (curr_page > 1).then(|| curr_page - 1),
    )];

    for page in 1..=page_count {
        let in_window = page + PAGE_WINDOW >= curr_page && page <= curr_page + PAGE_WINDOW;

        if page == curr_page {
            indicators.push(PaginationIndicator::CurrPage(page));
        } else if page == 1 || page == page_count || in_window {
            indicators.push(PaginationIndicator::Page(page));
        } else if page + PAGE_WINDOW + 1 == curr_page || page == curr_page + PAGE_WINDOW + 1 {
            indicators.push(PaginationIndicator::Ellipsis);
        }
    }

    indicators.push(PaginationIndicator::NextButton(
        (curr_page < page_count).then(|| curr_page + 1),
    ));

    indicators
}

const PAGE_LINK_STYLE: &str = "block px-3 py-2 rounded border border-gray-200 \
    dark:border-gray-700 text-blue-600 hover:bg-gray-100 dark:hover:bg-gray-700";
const CURRENT_PAGE_STYLE: &str = "block px-3 py-2 rounded font-bold text-white bg-blue-600";
const DISABLED_STYLE: &str = "block px-3 py-2 rounded text-gray-400 dark:text-gray-500";

/// Renders the pagination controls for `page_state`.
pub fn pagination_view(page_state: &PageState) -> Markup {
    let indicators =
        create_pagination_indicators(page_state.current_page, page_state.page_count());

    let page_link = |page: u64, label: &str| {
        html! {
            a
                href="#"
                role="button"
                class=(PAGE_LINK_STYLE)
                hx-get=(format_endpoint(endpoints::DASHBOARD_TRANSACTIONS_PAGE, page))
                hx-include={ "#" (FILTERS_FORM_ID) }
                hx-target={ "#" (TRANSACTIONS_SECTION_ID) }
                hx-swap="outerHTML"
                data-page=(page)
            { (label) }
        }
    };

    html! {
        nav id=(PAGINATION_ID) class="pagination flex justify-center mt-4" aria-label="Transaction pages"
        {
            @if !indicators.is_empty() {
                ul class="pagination flex items-center gap-1"
                {
                    @for indicator in indicators {
                        li class="page-item"
                        {
                            @match indicator {
                                PaginationIndicator::BackButton(Some(page)) => { (page_link(page, "Previous")) }
                                PaginationIndicator::BackButton(None) => {
                                    span class=(DISABLED_STYLE) aria-disabled="true" { "Previous" }
                                }
                                PaginationIndicator::Page(page) => { (page_link(page, &page.to_string())) }
                                PaginationIndicator::CurrPage(page) => {
                                    span class=(CURRENT_PAGE_STYLE) aria-current="page" { (page) }
                                }
                                PaginationIndicator::Ellipsis => {
                                    span class=(DISABLED_STYLE) { "..." }
                                }
                                PaginationIndicator::NextButton(Some(page)) => { (page_link(page, "Next")) }
                                PaginationIndicator::NextButton(None) => {
                                    span class=(DISABLED_STYLE) aria-disabled="true" { "Next" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
