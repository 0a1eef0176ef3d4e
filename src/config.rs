//! The settings that control how the dashboard loads and pages data.

use std::time::Duration;

use time::{Date, macros::date};

use crate::{filters::DateBounds, pagination::ITEMS_PER_PAGE};

/// The earliest date in the bundled transaction data.
pub const DEFAULT_DATA_START: Date = date!(2024 - 05 - 10);
/// The latest date in the bundled transaction data.
pub const DEFAULT_DATA_END: Date = date!(2025 - 01 - 16);

/// The config for loading and displaying dashboard data.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// The number of transactions to display per page.
    pub items_per_page: u64,
    /// How many times the initial load is retried after the first attempt fails.
    pub max_retries: u32,
    /// How long each request of the initial load may take.
    pub request_timeout: Duration,
    /// The delay before retry `n` is `n * retry_delay_step`.
    pub retry_delay_step: Duration,
    /// How long the page shell waits before starting the initial load.
    pub initial_load_delay: Duration,
    /// The span of dates the date filters are restricted to.
    pub date_bounds: DateBounds,
}

impl DashboardConfig {
    /// The delay before retry `attempt`, counting from 1.
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        self.retry_delay_step * attempt
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            items_per_page: ITEMS_PER_PAGE,
            max_retries: 3,
            request_timeout: Duration::from_millis(5000),
            retry_delay_step: Duration::from_millis(1000),
            initial_load_delay: Duration::from_millis(1000),
            date_bounds: DateBounds::new(DEFAULT_DATA_START, DEFAULT_DATA_END),
        }
    }
}
