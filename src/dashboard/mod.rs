//! The transaction dashboard.
//!
//! The page shell is served once; everything else is swapped in as htmx
//! fragments rendered from the responses of the transaction API.

mod actions;
mod cards;
mod charts;
mod handlers;
mod loader;
mod state;
mod tables;
mod views;

pub use actions::{clear_transactions, get_clear_confirmation, upload_file};
pub use handlers::{
    apply_filters, get_dashboard_page, get_filtered_transactions, get_initial_load, get_summary,
    get_transaction_details, get_transactions_page, update_amount_range,
};
pub use state::DashboardState;

pub(crate) const DASHBOARD_CONTENT_ID: &str = "dashboard-content";
pub(crate) const SUMMARY_SECTION_ID: &str = "summary-section";
pub(crate) const TRANSACTIONS_SECTION_ID: &str = "transactions-section";
pub(crate) const TRANSACTIONS_TABLE_ID: &str = "transactions-table";
pub(crate) const FILTERS_FORM_ID: &str = "filters";
pub(crate) const DATE_RANGE_ID: &str = "date-range";
pub(crate) const AMOUNT_RANGE_ID: &str = "amount-range";
pub(crate) const UPLOAD_STATUS_ID: &str = "upload-status";
pub(crate) const MODAL_CONTAINER_ID: &str = "modal-container";
