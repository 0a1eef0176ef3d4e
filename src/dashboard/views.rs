//! The dashboard page shell, the filter form and the summary section.

use maud::{Markup, PreEscaped, html};

use crate::{
    alert::{ALERT_CONTAINER_ID, NOTIFICATION_DURATION_MS},
    endpoints,
    filters::{
        AmountField, DateBounds, DateRange, DateRangePreset, FilterCriteria, TransactionType,
    },
    format::{format_date, format_transaction_type},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        HeadElement, PAGE_CONTAINER_STYLE, base, loading_spinner,
    },
    pagination::PageState,
};

use super::{
    AMOUNT_RANGE_ID, DASHBOARD_CONTENT_ID, DATE_RANGE_ID, FILTERS_FORM_ID, MODAL_CONTAINER_ID,
    SUMMARY_SECTION_ID, TRANSACTIONS_SECTION_ID, UPLOAD_STATUS_ID,
    cards::summary_cards_view,
    charts::{charts_script, charts_view, summary_charts},
    state::{SummaryState, TableState, TransactionsView},
    tables::transactions_section,
};

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";

/// Renders the summary cards and charts.
///
/// With `oob` set the section replaces the one on the page as an out-of-band
/// swap.
pub(super) fn summary_section(summary: &SummaryState, oob: bool) -> Markup {
    html! {
        section
            id=(SUMMARY_SECTION_ID)
            class="w-full my-4"
            hx-swap-oob=[oob.then_some("outerHTML")]
        {
            (summary_cards_view(summary))
            (charts_view())

            @match summary {
                SummaryState::Loading => {}
                SummaryState::Loaded(summary) => {
                    (charts_script(&summary_charts(summary)))
                }
                SummaryState::Unavailable => {
                    (charts_script(&summary_charts(&Default::default())))
                }
            }
        }
    }
}

fn transaction_type_select(selected: Option<TransactionType>) -> Markup {
    html! {
        div
        {
            label for="transaction-type" class=(FORM_LABEL_STYLE) { "Transaction Type" }
            select
                id="transaction-type"
                name="type"
                class=(FORM_TEXT_INPUT_STYLE)
                hx-get=(endpoints::DASHBOARD_TRANSACTIONS)
                hx-trigger="change"
                hx-include={ "#" (FILTERS_FORM_ID) }
                hx-target={ "#" (TRANSACTIONS_SECTION_ID) }
                hx-swap="outerHTML"
            {
                option value="" selected[selected.is_none()] { "All Types" }

                @for transaction_type in TransactionType::ALL {
                    option
                        value=(transaction_type.as_query_value())
                        selected[selected == Some(transaction_type)]
                    {
                        (format_transaction_type(transaction_type.as_query_value()))
                    }
                }
            }
        }
    }
}

/// Renders the date inputs and the range presets.
///
/// The preset picker always starts out empty; picking a preset fills in the
/// date inputs through an out-of-band swap of this element.
pub(super) fn date_range_view(range: DateRange, bounds: &DateBounds, oob: bool) -> Markup {
    let earliest = format_date(bounds.earliest());
    let latest = format_date(bounds.latest());

    html! {
        div
            id=(DATE_RANGE_ID)
            class="grid grid-cols-1 sm:grid-cols-3 gap-2"
            hx-swap-oob=[oob.then_some("outerHTML")]
        {
            div
            {
                label for="start-date" class=(FORM_LABEL_STYLE) { "From" }
                input
                    id="start-date"
                    name="start_date"
                    type="date"
                    class=(FORM_TEXT_INPUT_STYLE)
                    min=(earliest)
                    max=(latest)
                    value=(format_date(range.start))
                    hx-get=(endpoints::DASHBOARD_TRANSACTIONS)
                    hx-trigger="change"
                    hx-include={ "#" (FILTERS_FORM_ID) }
                    hx-target={ "#" (TRANSACTIONS_SECTION_ID) }
                    hx-swap="outerHTML";
            }

            div
            {
                label for="end-date" class=(FORM_LABEL_STYLE) { "To" }
                input
                    id="end-date"
                    name="end_date"
                    type="date"
                    class=(FORM_TEXT_INPUT_STYLE)
                    min=(earliest)
                    max=(latest)
                    value=(format_date(range.end))
                    hx-get=(endpoints::DASHBOARD_TRANSACTIONS)
                    hx-trigger="change"
                    hx-include={ "#" (FILTERS_FORM_ID) }
                    hx-target={ "#" (TRANSACTIONS_SECTION_ID) }
                    hx-swap="outerHTML";
            }

            div
            {
                label for="date-preset" class=(FORM_LABEL_STYLE) { "Quick Range" }
                select
                    id="date-preset"
                    name="preset"
                    class=(FORM_TEXT_INPUT_STYLE)
                    hx-get=(endpoints::DASHBOARD_TRANSACTIONS)
                    hx-trigger="change"
                    hx-include={ "#" (FILTERS_FORM_ID) }
                    hx-target={ "#" (TRANSACTIONS_SECTION_ID) }
                    hx-swap="outerHTML"
                {
                    option value="" selected { "Choose a range" }

                    @for preset in DateRangePreset::ALL {
                        option value=(preset.as_query_value()) { (preset.label()) }
                    }
                }
            }
        }
    }
}

/// Renders the amount range inputs with the given text.
pub(super) fn amount_range_view(min: &str, max: &str) -> Markup {
    let amount_input = |field: AmountField, name: &str, placeholder: &str, value: &str| {
        html! {
            input
                id=(field.input_id())
                name=(name)
                type="text"
                inputmode="numeric"
                autocomplete="off"
                placeholder=(placeholder)
                class=(FORM_TEXT_INPUT_STYLE)
                value=(value)
                hx-post=(endpoints::DASHBOARD_AMOUNT_RANGE)
                hx-trigger="input"
                hx-include={ "#" (AMOUNT_RANGE_ID) }
                hx-target={ "#" (AMOUNT_RANGE_ID) }
                hx-swap="outerHTML";
        }
    };

    html! {
        div id=(AMOUNT_RANGE_ID) class="grid grid-cols-2 gap-2"
        {
            div
            {
                label for=(AmountField::Min.input_id()) class=(FORM_LABEL_STYLE) { "Min Amount" }
                (amount_input(AmountField::Min, "min_amount", "0", min))
            }

            div
            {
                label for=(AmountField::Max.input_id()) class=(FORM_LABEL_STYLE) { "Max Amount" }
                (amount_input(AmountField::Max, "max_amount", "Any", max))
            }
        }
    }
}

fn filters_view(criteria: &FilterCriteria, bounds: &DateBounds) -> Markup {
    let amount_text = |amount: Option<u64>| amount.map(|amount| amount.to_string()).unwrap_or_default();

    html! {
        form
            id=(FILTERS_FORM_ID)
            class="w-full grid grid-cols-1 lg:grid-cols-2 gap-4 p-4 my-4 rounded-lg shadow-md bg-white dark:bg-gray-800"
            onsubmit="return false"
        {
            (transaction_type_select(criteria.transaction_type))

            (date_range_view(criteria.date_range, bounds, false))

            div
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search" }
                input
                    id="search"
                    name="search"
                    type="search"
                    placeholder="Sender, recipient or message, press Enter"
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=(criteria.search)
                    hx-get=(endpoints::DASHBOARD_TRANSACTIONS)
                    hx-trigger="keyup[key=='Enter']"
                    hx-include={ "#" (FILTERS_FORM_ID) }
                    hx-target={ "#" (TRANSACTIONS_SECTION_ID) }
                    hx-swap="outerHTML";
            }

            (amount_range_view(&amount_text(criteria.min_amount), &amount_text(criteria.max_amount)))

            div class="lg:col-span-2 flex justify-end"
            {
                button
                    id="apply-filters"
                    type="button"
                    class=(BUTTON_PRIMARY_STYLE)
                    hx-get=(endpoints::DASHBOARD_APPLY_FILTERS)
                    hx-include={ "#" (FILTERS_FORM_ID) }
                    hx-target={ "#" (TRANSACTIONS_SECTION_ID) }
                    hx-swap="outerHTML"
                {
                    (loading_spinner())
                    "Apply Filters"
                }
            }
        }
    }
}

fn upload_form_view() -> Markup {
    html! {
        form
            id="upload-form"
            class="flex flex-wrap items-center gap-2"
            hx-post=(endpoints::DASHBOARD_UPLOAD)
            hx-encoding="multipart/form-data"
            hx-target={ "#" (UPLOAD_STATUS_ID) }
            hx-swap="outerHTML"
            hx-target-400={ "#" (ALERT_CONTAINER_ID) }
            hx-on:htmx:after-request="if (event.detail.successful) this.reset()"
        {
            input
                id="sms-file"
                name="file"
                type="file"
                accept=".xml"
                class="text-sm";

            button type="submit" class=(BUTTON_PRIMARY_STYLE)
            {
                (loading_spinner())
                "Upload"
            }

            (upload_status_view(None))
        }
    }
}

/// The outcome of the last upload shown next to the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum UploadStatus {
    Succeeded,
    Failed(String),
}

/// Renders the upload status text. A success message clears itself.
pub(super) fn upload_status_view(status: Option<&UploadStatus>) -> Markup {
    html! {
        @match status {
            None => {
                span id=(UPLOAD_STATUS_ID) class="text-sm" {}
            }
            Some(UploadStatus::Succeeded) => {
                span id=(UPLOAD_STATUS_ID) class="text-sm text-success text-green-600"
                {
                    "File processed successfully!"
                }
                script
                {
                    (PreEscaped(format!(
                        "setTimeout(function() {{ \
                            const status = document.getElementById('{UPLOAD_STATUS_ID}'); \
                            if (status) {{ status.textContent = ''; }} \
                        }}, {NOTIFICATION_DURATION_MS});"
                    )))
                }
            }
            Some(UploadStatus::Failed(message)) => {
                span id=(UPLOAD_STATUS_ID) class="text-sm text-danger text-red-600" { (message) }
            }
        }
    }
}

/// The view shown before the first load finishes.
fn loading_transactions(items_per_page: u64) -> TransactionsView {
    TransactionsView {
        table: TableState::Loading,
        page: PageState::new(items_per_page),
        notify_empty: false,
    }
}

/// Renders the whole dashboard page in its loading state.
///
/// The first load starts `initial_load_delay_ms` after the page is shown.
pub(super) fn dashboard_page(
    criteria: &FilterCriteria,
    bounds: &DateBounds,
    items_per_page: u64,
    initial_load_delay_ms: u128,
) -> Markup {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            header class="w-full flex flex-wrap justify-between items-center gap-4 mb-4"
            {
                h1 class="text-2xl font-bold" { "MoMo Transaction Dashboard" }

                div class="flex flex-wrap items-center gap-4"
                {
                    (upload_form_view())

                    button
                        id="clear-transactions"
                        type="button"
                        class=(BUTTON_DELETE_STYLE)
                        hx-get=(endpoints::DASHBOARD_CLEAR)
                        hx-target={ "#" (MODAL_CONTAINER_ID) }
                    {
                        "Clear All Transactions"
                    }
                }
            }

            (filters_view(criteria, bounds))

            div
                id=(DASHBOARD_CONTENT_ID)
                class="w-full"
                hx-get=(endpoints::DASHBOARD_INITIAL)
                hx-trigger={ "load delay:" (initial_load_delay_ms) "ms" }
                hx-swap="none"
            {
                (summary_section(&SummaryState::Loading, false))
                (transactions_section(&loading_transactions(items_per_page), false))
            }
        }
    };

    base(
        "Dashboard",
        &[HeadElement::ScriptLink(ECHARTS_URL.to_owned())],
        &content,
    )
}
