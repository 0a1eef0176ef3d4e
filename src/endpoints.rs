//! The URIs served by the dashboard.
//!
//! For endpoints that take a parameter, e.g., '/dashboard/transactions/{transaction_id}',
//! use [format_endpoint].

use std::fmt::Display;

/// The dashboard page shell.
pub const ROOT: &str = "/";
/// The first load of the summary and transactions, retried while the
/// transaction API is starting up.
pub const DASHBOARD_INITIAL: &str = "/dashboard/initial";
/// The transactions matching the filter form, starting from the first page.
pub const DASHBOARD_TRANSACTIONS: &str = "/dashboard/transactions";
/// A page of the transactions matching the filter form.
pub const DASHBOARD_TRANSACTIONS_PAGE: &str = "/dashboard/transactions/page/{page}";
/// The details of a single transaction, shown in a modal.
pub const DASHBOARD_TRANSACTION: &str = "/dashboard/transactions/{transaction_id}";
/// The summary cards and charts.
pub const DASHBOARD_SUMMARY: &str = "/dashboard/summary";
/// Reloads both the transactions and the summary.
pub const DASHBOARD_APPLY_FILTERS: &str = "/dashboard/filters/apply";
/// Sanitises and clamps the amount range inputs.
pub const DASHBOARD_AMOUNT_RANGE: &str = "/dashboard/filters/amount";
/// Uploads an SMS export to the transaction API.
pub const DASHBOARD_UPLOAD: &str = "/dashboard/upload";
/// The clear button (GET) and the confirmed clear (POST).
pub const DASHBOARD_CLEAR: &str = "/dashboard/clear";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/dashboard/transactions/page/{page}',
/// '{page}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
