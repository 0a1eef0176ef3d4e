//! Dashboard HTTP handlers.
//!
//! Every handler except [get_dashboard_page] answers an htmx request with a
//! fragment. A load that was superseded by a newer one answers with
//! `204 No Content`, which htmx leaves unswapped.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxTrigger;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::{Alert, Notification},
    api::TransactionApi,
    filters::{AmountField, FilterCriteria, FilterForm, clamp_amount_inputs},
    format::format_date,
};

use super::{
    loader::{load_initial, load_summary, load_transactions},
    state::{DashboardState, TransactionsView},
    tables::{transaction_details_modal, transactions_section},
    views::{amount_range_view, dashboard_page, date_range_view, summary_section},
};

/// The response to a load that a newer load replaced.
pub(super) fn superseded() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Renders the transaction section, adding the "No transaction found"
/// notification when the view asks for it.
pub(super) fn transactions_fragment(view: &TransactionsView, oob: bool) -> Markup {
    html! {
        (transactions_section(view, oob))

        @if view.notify_empty {
            (Notification::danger("No transaction found").into_oob_html())
        }
    }
}

/// Reads the filter form against the current filters.
///
/// Also returns whether the date inputs on the page need to be replaced, i.e.
/// a preset was picked or the typed dates were clamped or swapped.
fn read_filters(form: &FilterForm, dashboard: &DashboardState) -> (FilterCriteria, bool) {
    let criteria = form.to_criteria(
        &dashboard.filters,
        &dashboard.date_bounds,
        dashboard.amount_edited,
    );

    let sync_dates = form.preset().is_some()
        || format_date(criteria.date_range.start) != form.start_date.trim()
        || format_date(criteria.date_range.end) != form.end_date.trim();

    (criteria, sync_dates)
}

/// Display the dashboard page in its loading state.
///
/// Opening the page resets the filters to their defaults.
pub async fn get_dashboard_page<A: TransactionApi>(
    State(state): State<AppState<A>>,
) -> Result<Response, Error> {
    let (criteria, bounds) = {
        let mut dashboard = state.lock_dashboard()?;
        let criteria = FilterCriteria::new(dashboard.date_bounds.default_range());
        dashboard.change_filters(criteria.clone());

        (criteria, dashboard.date_bounds)
    };

    Ok(dashboard_page(
        &criteria,
        &bounds,
        state.config.items_per_page,
        state.config.initial_load_delay.as_millis(),
    )
    .into_response())
}

/// Load the summary and the first page of transactions, retrying while the
/// transaction API is unavailable.
///
/// Both sections are swapped out of band, so a section replaced by a newer
/// load is simply left out.
pub async fn get_initial_load<A: TransactionApi>(
    State(state): State<AppState<A>>,
) -> Result<Response, Error> {
    let load = load_initial(&state).await?;

    if load.is_superseded() {
        return Ok(superseded());
    }

    Ok(html! {
        @if let Some(summary) = &load.summary {
            (summary_section(summary, true))
        }

        @if let Some(transactions) = &load.transactions {
            (transactions_fragment(transactions, true))
        }
    }
    .into_response())
}

/// Apply the filter form and show the first page of matching transactions.
pub async fn get_filtered_transactions<A: TransactionApi>(
    State(state): State<AppState<A>>,
    Form(form): Form<FilterForm>,
) -> Result<Response, Error> {
    let (date_range, bounds, sync_dates) = {
        let mut dashboard = state.lock_dashboard()?;
        let (criteria, sync_dates) = read_filters(&form, &dashboard);
        let date_range = criteria.date_range;
        dashboard.change_filters(criteria);

        (date_range, dashboard.date_bounds, sync_dates)
    };

    let Some(view) = load_transactions(&state).await? else {
        return Ok(superseded());
    };

    Ok(html! {
        (transactions_fragment(&view, false))

        @if sync_dates {
            (date_range_view(date_range, &bounds, true))
        }
    }
    .into_response())
}

/// Show `page` of the transactions matching the filter form.
///
/// A page outside the last known page count is ignored.
pub async fn get_transactions_page<A: TransactionApi>(
    State(state): State<AppState<A>>,
    Path(page): Path<u64>,
    Form(form): Form<FilterForm>,
) -> Result<Response, Error> {
    {
        let mut dashboard = state.lock_dashboard()?;

        if !dashboard.page.contains(page) {
            tracing::debug!(
                "Ignoring request for page {page} of {}",
                dashboard.page.page_count()
            );
            return Ok(superseded());
        }

        let (criteria, _) = read_filters(&form, &dashboard);
        dashboard.filters = criteria;
        dashboard.change_page(page);
    }

    let Some(view) = load_transactions(&state).await? else {
        return Ok(superseded());
    };

    Ok(transactions_fragment(&view, false).into_response())
}

/// Apply the filter form and reload both the transactions and the summary.
pub async fn apply_filters<A: TransactionApi>(
    State(state): State<AppState<A>>,
    Form(form): Form<FilterForm>,
) -> Result<Response, Error> {
    let (date_range, bounds, sync_dates) = {
        let mut dashboard = state.lock_dashboard()?;
        let (criteria, sync_dates) = read_filters(&form, &dashboard);
        let date_range = criteria.date_range;
        dashboard.change_filters(criteria);

        (date_range, dashboard.date_bounds, sync_dates)
    };

    let (summary, transactions) = tokio::join!(load_summary(&state), load_transactions(&state));

    let Some(view) = transactions? else {
        return Ok(superseded());
    };
    let summary = summary?;

    Ok(html! {
        (transactions_fragment(&view, false))

        @if let Some(summary) = &summary {
            (summary_section(summary, true))
        }

        @if sync_dates {
            (date_range_view(date_range, &bounds, true))
        }
    }
    .into_response())
}

/// Reload the summary section.
pub async fn get_summary<A: TransactionApi>(
    State(state): State<AppState<A>>,
) -> Result<Response, Error> {
    Ok(match load_summary(&state).await? {
        Some(summary) => summary_section(&summary, false).into_response(),
        None => superseded(),
    })
}

/// Show the details of one transaction in a modal.
pub async fn get_transaction_details<A: TransactionApi>(
    State(state): State<AppState<A>>,
    Path(transaction_id): Path<String>,
) -> Response {
    match state.api.transaction(&transaction_id).await {
        Ok(transaction) => transaction_details_modal(&transaction).into_response(),
        Err(error) => {
            tracing::error!("Error loading transaction {transaction_id}: {error}");
            (
                StatusCode::BAD_GATEWAY,
                Alert::ErrorSimple {
                    message: "Error loading transaction details. Please try again.".to_owned(),
                }
                .into_html(),
            )
                .into_response()
        }
    }
}

/// The text of the amount inputs.
#[derive(Debug, Default, Deserialize)]
pub struct AmountRangeForm {
    #[serde(default)]
    pub min_amount: String,
    #[serde(default)]
    pub max_amount: String,
}

/// Clean up the amount inputs as the user types.
///
/// Only digits are kept, and the input named by the `HX-Trigger` header is
/// pulled back when the minimum would exceed a nonzero maximum. That input is
/// remembered so later filter loads clamp the amounts the same way.
pub async fn update_amount_range<A: TransactionApi>(
    State(state): State<AppState<A>>,
    HxTrigger(trigger): HxTrigger,
    Form(form): Form<AmountRangeForm>,
) -> Result<Markup, Error> {
    let edited = trigger
        .as_deref()
        .and_then(AmountField::from_input_id)
        .unwrap_or_default();
    state.lock_dashboard()?.amount_edited = edited;

    let (min, max) = clamp_amount_inputs(&form.min_amount, &form.max_amount, edited);

    Ok(amount_range_view(&min, &max))
}
