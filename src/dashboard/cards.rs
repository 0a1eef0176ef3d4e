//! The summary cards at the top of the dashboard.

use maud::{Markup, html};

use crate::{
    format::format_active_day,
    html::{format_count, format_rwf},
};

use super::state::SummaryState;

/// The text of each summary card, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CardValues {
    total_transactions: String,
    total_volume: String,
    average_transaction: String,
    largest_transaction: String,
    total_fees: String,
    most_active_day: String,
}

impl CardValues {
    fn from_state(state: &SummaryState) -> Self {
        match state {
            SummaryState::Loading => {
                let loading = || "Loading...".to_owned();
                Self {
                    total_transactions: loading(),
                    total_volume: loading(),
                    average_transaction: loading(),
                    largest_transaction: loading(),
                    total_fees: loading(),
                    most_active_day: loading(),
                }
            }
            SummaryState::Loaded(summary) => Self {
                total_transactions: format_count(summary.total_transactions),
                total_volume: format_rwf(summary.total_volume),
                average_transaction: format_rwf(summary.statistics.avg_amount),
                largest_transaction: format_rwf(summary.statistics.max_amount),
                total_fees: format_rwf(summary.statistics.total_fees),
                most_active_day: format_active_day(summary.statistics.most_active_day.as_deref()),
            },
            SummaryState::Unavailable => Self {
                total_transactions: "0".to_owned(),
                total_volume: format_rwf(0.0),
                average_transaction: format_rwf(0.0),
                largest_transaction: format_rwf(0.0),
                total_fees: format_rwf(0.0),
                most_active_day: "-".to_owned(),
            },
        }
    }
}

fn summary_card(id: &str, title: &str, value: &str) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
        {
            h4 class="text-sm font-medium text-gray-600 dark:text-gray-400" { (title) }
            p id=(id) class="summary-value mt-2 text-2xl font-semibold" { (value) }
        }
    }
}

/// Renders the six summary cards for `state`.
pub(super) fn summary_cards_view(state: &SummaryState) -> Markup {
    let values = CardValues::from_state(state);

    html! {
        div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4 w-full"
        {
            (summary_card("total-transactions", "Total Transactions", &values.total_transactions))
            (summary_card("total-volume", "Total Volume", &values.total_volume))
            (summary_card("avg-transaction-amount", "Average Transaction", &values.average_transaction))
            (summary_card("largest-transaction", "Largest Transaction", &values.largest_transaction))
            (summary_card("total-fees", "Total Fees", &values.total_fees))
            (summary_card("most-active-day", "Most Active Day", &values.most_active_day))
        }
    }
}
