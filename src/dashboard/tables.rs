//! The transaction table and the transaction details modal.

use maud::{Markup, html};

use crate::{
    api::TransactionRecord,
    endpoints::{self, format_endpoint},
    format::{format_timestamp, format_transaction_type},
    html::{
        BUTTON_SECONDARY_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        TYPE_BADGE_STYLE, format_rwf,
    },
    pagination::pagination_view,
};

use super::{
    MODAL_CONTAINER_ID, TRANSACTIONS_SECTION_ID, TRANSACTIONS_TABLE_ID,
    state::{TableState, TransactionsView},
};

/// The number of columns in the transaction table.
const COLUMN_COUNT: u8 = 6;

const MESSAGE_CELL_STYLE: &str = "px-6 py-4 text-center";
const DANGER_TEXT_STYLE: &str = "text-danger text-red-600 dark:text-red-400";

/// Shows "-" in place of an optional value that is missing or blank.
fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => "-",
    }
}

fn message_row(message: &str, extra_class: Option<&str>) -> Markup {
    let class = match extra_class {
        Some(extra) => format!("{MESSAGE_CELL_STYLE} {extra}"),
        None => MESSAGE_CELL_STYLE.to_owned(),
    };

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td colspan=(COLUMN_COUNT) class=(class) { (message) }
        }
    }
}

fn transaction_row(transaction: &TransactionRecord) -> Markup {
    let date = transaction
        .transaction_date
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_else(|| "-".to_owned());

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.transaction_id)
        {
            td class=(TABLE_CELL_STYLE) { (date) }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(TYPE_BADGE_STYLE) { (format_transaction_type(&transaction.transaction_type)) }
            }
            td class={ (TABLE_CELL_STYLE) " text-right whitespace-nowrap" }
            {
                (format_rwf(transaction.amount.unwrap_or_default()))
            }
            td class=(TABLE_CELL_STYLE) { (or_dash(transaction.sender.as_deref())) }
            td class=(TABLE_CELL_STYLE) { (or_dash(transaction.recipient.as_deref())) }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    class=(BUTTON_SECONDARY_STYLE)
                    hx-get=(format_endpoint(endpoints::DASHBOARD_TRANSACTION, &transaction.transaction_id))
                    hx-target={ "#" (MODAL_CONTAINER_ID) }
                    hx-target-error="#alert-container"
                {
                    "Details"
                }
            }
        }
    }
}

/// Renders the rows of the transaction table for `table`.
pub(super) fn table_rows(table: &TableState) -> Markup {
    match table {
        TableState::Loading => message_row("Loading transactions...", None),
        TableState::Rows(transactions) => html! {
            @for transaction in transactions {
                (transaction_row(transaction))
            }
        },
        TableState::NoMatches => message_row("No transaction found", Some(DANGER_TEXT_STYLE)),
        TableState::LoadFailed => {
            message_row("Error loading transactions. Please try again.", None)
        }
        TableState::Unavailable => message_row("No transactions found", None),
    }
}

/// Renders the transaction table and its pagination.
///
/// With `oob` set the section replaces the one on the page as an out-of-band
/// swap.
pub(super) fn transactions_section(view: &TransactionsView, oob: bool) -> Markup {
    html! {
        section
            id=(TRANSACTIONS_SECTION_ID)
            class="w-full my-4"
            hx-swap-oob=[oob.then_some("outerHTML")]
        {
            h3 class="text-xl font-semibold mb-4" { "Transactions" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                            th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Sender" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Recipient" }
                            th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                        }
                    }

                    tbody id=(TRANSACTIONS_TABLE_ID)
                    {
                        (table_rows(&view.table))
                    }
                }
            }

            (pagination_view(&view.page))
        }
    }
}

/// Renders the modal listing every field of `transaction`.
pub(super) fn transaction_details_modal(transaction: &TransactionRecord) -> Markup {
    let date = transaction
        .transaction_date
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_else(|| "-".to_owned());

    let fields = [
        ("Transaction ID", transaction.transaction_id.clone()),
        (
            "Type",
            format_transaction_type(&transaction.transaction_type),
        ),
        ("Amount", format_rwf(transaction.amount.unwrap_or_default())),
        ("Fee", format_rwf(transaction.fee.unwrap_or_default())),
        ("Date", date),
        ("Sender", or_dash(transaction.sender.as_deref()).to_owned()),
        (
            "Recipient",
            or_dash(transaction.recipient.as_deref()).to_owned(),
        ),
        (
            "Phone Number",
            or_dash(transaction.phone_number.as_deref()).to_owned(),
        ),
        ("Balance", format_rwf(transaction.balance.unwrap_or_default())),
        ("Message", or_dash(transaction.message.as_deref()).to_owned()),
    ];

    modal(
        "transaction-modal",
        "Transaction Details",
        html! {
            table class="w-full text-sm text-left"
            {
                @for (label, value) in fields {
                    tr class="border-b dark:border-gray-700"
                    {
                        th scope="row" class="py-2 pr-4 font-medium whitespace-nowrap" { (label) }
                        td class="py-2 break-words" { (value) }
                    }
                }
            }
        },
        html! {
            button type="button" class=(BUTTON_SECONDARY_STYLE) onclick=(CLOSE_MODAL_SCRIPT) { "Close" }
        },
    )
}

/// Empties the modal container.
pub(super) const CLOSE_MODAL_SCRIPT: &str =
    "document.getElementById('modal-container').innerHTML = ''";

/// Renders a dialog over the page with `body` and a row of `actions`.
pub(super) fn modal(id: &str, title: &str, body: Markup, actions: Markup) -> Markup {
    html! {
        div
            id=(id)
            class="modal fixed inset-0 z-50 flex items-center justify-center bg-black/50 px-4"
            role="dialog"
            aria-modal="true"
        {
            div class="w-full max-w-lg rounded-lg bg-white dark:bg-gray-800 p-6 shadow-xl"
            {
                div class="flex justify-between items-start mb-4"
                {
                    h3 class="text-lg font-semibold" { (title) }
                    button
                        type="button"
                        class="font-bold"
                        aria-label="Close"
                        onclick=(CLOSE_MODAL_SCRIPT)
                    { "×" }
                }

                div class="modal-body" { (body) }

                div class="flex justify-end gap-2 mt-6" { (actions) }
            }
        }
    }
}
