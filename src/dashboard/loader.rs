//! Fetches dashboard data from the transaction API and applies it to the
//! dashboard state.

use std::future::Future;

use crate::{
    AppState, Error,
    api::{SummaryResponse, TransactionApi, TransactionPage, TransactionQuery},
};

use super::state::{SummaryState, TransactionsView};

/// Everything shown once the initial load finishes.
///
/// A part is `None` when a newer load of that part superseded it.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct InitialLoad {
    pub summary: Option<SummaryState>,
    pub transactions: Option<TransactionsView>,
}

impl InitialLoad {
    /// Whether newer loads superseded both parts.
    pub fn is_superseded(&self) -> bool {
        self.summary.is_none() && self.transactions.is_none()
    }
}

/// Runs `request`, giving up with [Error::NetworkTimeout] after `limit`.
async fn with_timeout<T>(
    limit: std::time::Duration,
    request: impl Future<Output = Result<T, Error>>,
) -> Result<T, Error> {
    tokio::time::timeout(limit, request)
        .await
        .unwrap_or(Err(Error::NetworkTimeout))
}

/// One attempt at the initial load. A retriable error means the whole
/// attempt should be repeated.
async fn initial_attempt<A: TransactionApi>(
    state: &AppState<A>,
) -> Result<(SummaryState, Result<TransactionPage, Error>), Error> {
    let timeout = state.config.request_timeout;

    let summary = match with_timeout(timeout, state.api.summary()).await {
        Ok(summary) => SummaryState::Loaded(Box::new(summary)),
        Err(error) if error.is_retriable() => return Err(error),
        Err(error) => {
            tracing::error!("Error loading summary: {error}");
            SummaryState::Unavailable
        }
    };

    let query = TransactionQuery::first_page(state.config.items_per_page);
    let transactions = match with_timeout(timeout, state.api.transactions(&query)).await {
        Err(error) if error.is_retriable() => return Err(error),
        result => result,
    };

    Ok((summary, transactions))
}

/// Loads the summary and then the first page of transactions, retrying while
/// the transaction API is unavailable.
///
/// Every request is limited to the configured timeout. After the first
/// attempt and every retry have failed, the zero state is returned.
///
/// The summary and the transactions are each dropped from the result when a
/// newer load of that part started in the meantime.
pub(crate) async fn load_initial<A: TransactionApi>(
    state: &AppState<A>,
) -> Result<InitialLoad, Error> {
    let (summary_ticket, transactions_ticket) = {
        let mut dashboard = state.lock_dashboard()?;
        dashboard.retry.reset();
        dashboard.reset_page();
        (
            dashboard.begin_summary_load(),
            dashboard.begin_transactions_load(),
        )
    };

    loop {
        match initial_attempt(state).await {
            Ok((summary, transactions)) => {
                let mut dashboard = state.lock_dashboard()?;

                let load = InitialLoad {
                    summary: dashboard
                        .is_current_summary_load(summary_ticket)
                        .then_some(summary),
                    transactions: dashboard
                        .complete_transactions_load(transactions_ticket, transactions),
                };

                if load.is_superseded() {
                    tracing::warn!("Discarding superseded initial load");
                }

                return Ok(load);
            }
            Err(error) => {
                tracing::error!("Error loading data: {error}");

                let attempt = {
                    let mut dashboard = state.lock_dashboard()?;

                    if !dashboard.is_current_summary_load(summary_ticket)
                        && !dashboard.is_current_transactions_load(transactions_ticket)
                    {
                        tracing::warn!("Discarding superseded initial load");
                        return Ok(InitialLoad::default());
                    }

                    dashboard.retry.next_attempt()
                };

                match attempt {
                    Some(attempt) => {
                        tracing::info!(
                            "Retrying... Attempt {attempt} of {}",
                            state.config.max_retries
                        );
                        tokio::time::sleep(state.config.retry_delay(attempt)).await;
                    }
                    None => {
                        let mut dashboard = state.lock_dashboard()?;

                        return Ok(InitialLoad {
                            summary: dashboard
                                .is_current_summary_load(summary_ticket)
                                .then_some(SummaryState::Unavailable),
                            transactions: dashboard
                                .abandon_transactions_load(transactions_ticket),
                        });
                    }
                }
            }
        }
    }
}

/// Loads the current page of transactions matching the current filters.
///
/// No retry or timeout applies here; a failure is shown as an error row.
/// Returns `Ok(None)` when a newer load superseded this one.
pub(crate) async fn load_transactions<A: TransactionApi>(
    state: &AppState<A>,
) -> Result<Option<TransactionsView>, Error> {
    let (ticket, query) = {
        let mut dashboard = state.lock_dashboard()?;
        (dashboard.begin_transactions_load(), dashboard.query())
    };

    tracing::info!("Loading transactions page {}", query.page);
    let result = state.api.transactions(&query).await;

    let mut dashboard = state.lock_dashboard()?;
    let view = dashboard.complete_transactions_load(ticket, result);

    if view.is_none() {
        tracing::warn!("Discarding superseded transactions for page {}", query.page);
    }

    Ok(view)
}

/// Loads the summary. A failure is shown as the zero state.
///
/// Returns `Ok(None)` when a newer load superseded this one.
pub(crate) async fn load_summary<A: TransactionApi>(
    state: &AppState<A>,
) -> Result<Option<SummaryState>, Error> {
    let ticket = state.lock_dashboard()?.begin_summary_load();

    let result: Result<SummaryResponse, Error> = state.api.summary().await;

    if !state.lock_dashboard()?.is_current_summary_load(ticket) {
        tracing::warn!("Discarding superseded summary");
        return Ok(None);
    }

    Ok(Some(match result {
        Ok(summary) => SummaryState::Loaded(Box::new(summary)),
        Err(error) => {
            tracing::error!("Error loading summary: {error}");
            SummaryState::Unavailable
        }
    }))
}
