//! The per-session state of the dashboard: filters, paging, load status and
//! the tickets used to discard superseded responses.

use crate::{
    Error,
    api::{SummaryResponse, TransactionPage, TransactionQuery, TransactionRecord},
    config::DashboardConfig,
    filters::{AmountField, DateBounds, FilterCriteria},
    pagination::PageState,
};

/// Where the transaction list is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    /// The last load returned at least one transaction.
    Loaded,
    /// The last load returned no transactions.
    Empty,
    Error,
}

/// Identifies one load. Only the most recently issued ticket of each kind may
/// update the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Counts the retries of the initial load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    pub retry_count: u32,
    pub max_retries: u32,
}

impl RetryState {
    pub fn new(max_retries: u32) -> Self {
        Self {
            retry_count: 0,
            max_retries,
        }
    }

    pub fn reset(&mut self) {
        self.retry_count = 0;
    }

    /// Counts another retry and returns its number, or `None` once every
    /// retry has been used.
    pub fn next_attempt(&mut self) -> Option<u32> {
        if self.retry_count < self.max_retries {
            self.retry_count += 1;
            Some(self.retry_count)
        } else {
            None
        }
    }
}

/// What the summary section shows.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryState {
    Loading,
    Loaded(Box<SummaryResponse>),
    /// Zeros everywhere, shown when the summary could not be loaded.
    Unavailable,
}

/// What the transaction table shows.
#[derive(Debug, Clone, PartialEq)]
pub enum TableState {
    Loading,
    Rows(Vec<TransactionRecord>),
    /// The filters matched nothing.
    NoMatches,
    /// A filtered load failed.
    LoadFailed,
    /// The initial load gave up.
    Unavailable,
}

/// The outcome of a transactions load, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionsView {
    pub table: TableState,
    pub page: PageState,
    /// Whether to flash the "No transaction found" notification.
    pub notify_empty: bool,
}

/// The state shared by every request from the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub filters: FilterCriteria,
    pub page: PageState,
    pub status: LoadStatus,
    pub retry: RetryState,
    pub date_bounds: DateBounds,
    /// The amount input the user edited last, which wins when the minimum
    /// exceeds the maximum.
    pub amount_edited: AmountField,
    /// Set by a successful clear so the reload that follows does not report
    /// the now empty list as a problem.
    just_cleared: bool,
    transactions_generation: u64,
    summary_generation: u64,
}

impl DashboardState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            filters: FilterCriteria::new(config.date_bounds.default_range()),
            page: PageState::new(config.items_per_page),
            status: LoadStatus::Idle,
            retry: RetryState::new(config.max_retries),
            date_bounds: config.date_bounds,
            amount_edited: AmountField::default(),
            just_cleared: false,
            transactions_generation: 0,
            summary_generation: 0,
        }
    }

    /// Starts a transactions load, superseding any load still in flight.
    pub fn begin_transactions_load(&mut self) -> LoadTicket {
        self.transactions_generation += 1;
        self.status = LoadStatus::Loading;

        LoadTicket(self.transactions_generation)
    }

    /// Starts a summary load, superseding any load still in flight.
    pub fn begin_summary_load(&mut self) -> LoadTicket {
        self.summary_generation += 1;

        LoadTicket(self.summary_generation)
    }

    pub fn is_current_transactions_load(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.transactions_generation
    }

    pub fn is_current_summary_load(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.summary_generation
    }

    /// The request for the current page of transactions matching the filters.
    pub fn query(&self) -> TransactionQuery {
        self.filters
            .to_query(self.page.current_page, self.page.items_per_page)
    }

    /// Replaces the filters and goes back to the first page.
    pub fn change_filters(&mut self, filters: FilterCriteria) {
        self.filters = filters;
        self.page.current_page = 1;
    }

    /// Moves to `page`. Returns false, changing nothing, when `page` is not a
    /// page of the last response.
    pub fn change_page(&mut self, page: u64) -> bool {
        if !self.page.contains(page) {
            return false;
        }

        self.page.current_page = page;
        true
    }

    /// Goes back to the first page after an upload.
    pub fn reset_page(&mut self) {
        self.page.current_page = 1;
    }

    /// Records a successful clear.
    pub fn mark_cleared(&mut self) {
        self.page.current_page = 1;
        self.just_cleared = true;
    }

    pub fn just_cleared(&self) -> bool {
        self.just_cleared
    }

    /// Whether the table is showing transactions, i.e. whether there is
    /// anything to clear.
    pub fn has_transactions(&self) -> bool {
        self.status == LoadStatus::Loaded
    }

    /// Applies the result of the load identified by `ticket`.
    ///
    /// Returns `None` when a newer load has been started since, in which case
    /// the state is left untouched.
    pub fn complete_transactions_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<TransactionPage, Error>,
    ) -> Option<TransactionsView> {
        if !self.is_current_transactions_load(ticket) {
            return None;
        }

        let just_cleared = std::mem::take(&mut self.just_cleared);

        let (table, notify_empty) = match result {
            Ok(page) if page.transactions.is_empty() => {
                self.status = LoadStatus::Empty;
                self.page.total_items = page.total;
                (TableState::NoMatches, !just_cleared)
            }
            Ok(page) => {
                self.status = LoadStatus::Loaded;
                self.page.total_items = page.total;
                (TableState::Rows(page.transactions), false)
            }
            Err(error) => {
                tracing::error!("Error loading transactions: {error}");
                self.status = LoadStatus::Error;
                (TableState::LoadFailed, false)
            }
        };

        Some(TransactionsView {
            table,
            page: self.page,
            notify_empty,
        })
    }

    /// Gives up on the initial load identified by `ticket` and shows the zero
    /// state. Returns `None` when a newer load has been started since.
    pub fn abandon_transactions_load(&mut self, ticket: LoadTicket) -> Option<TransactionsView> {
        if !self.is_current_transactions_load(ticket) {
            return None;
        }

        self.just_cleared = false;
        self.status = LoadStatus::Error;
        self.page.total_items = 0;

        Some(TransactionsView {
            table: TableState::Unavailable,
            page: self.page,
            notify_empty: false,
        })
    }
}
