//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations of the summary:
//! - **Transaction Types**: share of transactions by type
//! - **Volume by Type**: total amount moved per type
//! - **Monthly Trends**: total volume and transaction count per month on two axes
//! - **Payments vs Deposits**: total amount per category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    datatype::DataPointItem,
    element::{
        AreaStyle, AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, ItemStyle,
        JsFunction, LineStyle, LineStyleType, Orient, SplitLine, Tooltip, Trigger,
    },
    series::{Bar, Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    api::{CategoryTotal, MonthlyTrend, SummaryResponse, TypeBreakdown},
    format::{format_month_label, format_transaction_type},
    html::CURRENCY_LABEL,
};

const PRIMARY: &str = "#0d6efd";
const SUCCESS: &str = "#198754";
const WARNING: &str = "#ffc107";
const DANGER: &str = "#dc3545";
const INFO: &str = "#0dcaf0";
const SECONDARY: &str = "#6c757d";

/// The colours cycled through by the type distribution chart.
const PALETTE: [&str; 6] = [PRIMARY, SUCCESS, WARNING, DANGER, INFO, SECONDARY];

/// A dashboard chart with its HTML container ID and ECharts configuration.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// The IDs of the chart containers, in display order.
pub(super) const CHART_IDS: [&str; 4] = [
    "type-chart",
    "volume-chart",
    "monthly-trends-chart",
    "payment-deposit-chart",
];

/// Builds every chart for `summary`.
pub(super) fn summary_charts(summary: &SummaryResponse) -> [DashboardChart; 4] {
    let [type_id, volume_id, trends_id, category_id] = CHART_IDS;

    [
        DashboardChart {
            id: type_id,
            options: type_distribution_chart(&summary.by_type).to_string(),
        },
        DashboardChart {
            id: volume_id,
            options: volume_by_type_chart(&summary.by_type).to_string(),
        },
        DashboardChart {
            id: trends_id,
            options: monthly_trends_chart(&summary.monthly_trends).to_string(),
        },
        DashboardChart {
            id: category_id,
            options: payment_deposit_chart(&summary.payment_deposit).to_string(),
        },
    ]
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view() -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto my-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for id in CHART_IDS {
                    div
                        id=(id)
                        class="min-h-[320px] rounded bg-white dark:bg-gray-100 shadow-md"
                    {}
                }
            }
        }
    )
}

/// Keeps text from closing the `<script>` element it is embedded in.
fn escape_script_text(text: &str) -> String {
    text.replace("</", r"<\/")
}

/// Generates the script that draws `charts` into their containers.
///
/// The script runs every time the summary is swapped in. Any chart already
/// drawn into a container is disposed, along with its resize listener, before
/// the replacement is created.
pub(super) fn charts_script(charts: &[DashboardChart]) -> Markup {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const registry = window.dashboardCharts = window.dashboardCharts || {{}};
                    const previous = registry["{id}"];
                    if (previous) {{
                        window.removeEventListener('resize', previous.onResize);
                        previous.chart.dispose();
                        delete registry["{id}"];
                    }}

                    const chartDom = document.getElementById("{id}");
                    if (!chartDom) {{
                        return;
                    }}
                    const stale = echarts.getInstanceByDom(chartDom);
                    if (stale) {{
                        stale.dispose();
                    }}

                    const chart = echarts.init(chartDom);
                    const option = {options};
                    chart.setOption(option);

                    const onResize = () => chart.resize();
                    window.addEventListener('resize', onResize);
                    registry["{id}"] = {{ chart, onResize }};
                }})();"#,
                id = chart.id,
                options = escape_script_text(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    html! {
        script { (PreEscaped(script_content)) }
    }
}

pub(super) fn type_distribution_chart(by_type: &[TypeBreakdown]) -> Chart {
    let data: Vec<DataPointItem> = by_type
        .iter()
        .map(|item| {
            DataPointItem::new(item.count as f64)
                .name(format_transaction_type(&item.transaction_type))
        })
        .collect();

    Chart::new()
        .title(Title::new().text("Transaction Types"))
        .color(PALETTE.iter().map(|&color| Color::from(color)).collect())
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(
            Legend::new()
                .orient(Orient::Vertical)
                .right("2%")
                .top("middle"),
        )
        .series(
            Pie::new()
                .name("Transactions")
                .radius("65%")
                .center(vec!["40%", "55%"])
                .data(data),
        )
}

pub(super) fn volume_by_type_chart(by_type: &[TypeBreakdown]) -> Chart {
    let labels: Vec<String> = by_type
        .iter()
        .map(|item| format_transaction_type(&item.transaction_type))
        .collect();
    let values: Vec<f64> = by_type.iter().map(|item| item.total_amount).collect();

    Chart::new()
        .title(Title::new().text("Volume by Type"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Bar::new()
                .name("Total Volume")
                .item_style(ItemStyle::new().color(PRIMARY).border_radius(4))
                .data(values),
        )
}

pub(super) fn monthly_trends_chart(monthly_trends: &[MonthlyTrend]) -> Chart {
    let labels: Vec<String> = monthly_trends
        .iter()
        .map(|trend| format_month_label(&trend.month))
        .collect();
    let volumes: Vec<f64> = monthly_trends
        .iter()
        .map(|trend| trend.total_amount)
        .collect();
    let counts: Vec<f64> = monthly_trends
        .iter()
        .map(|trend| trend.count as f64)
        .collect();

    Chart::new()
        .title(Title::new().text("Monthly Trends"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Line)),
        )
        .legend(Legend::new().top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(60)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name("Transactions")
                .split_line(SplitLine::new().show(false)),
        )
        .series(
            Line::new()
                .name("Total Volume")
                .smooth(0.4)
                .item_style(ItemStyle::new().color(PRIMARY))
                .area_style(AreaStyle::new().color("rgba(13, 110, 253, 0.1)"))
                .data(volumes),
        )
        .series(
            Line::new()
                .name("Number of Transactions")
                .smooth(0.4)
                .y_axis_index(1)
                .item_style(ItemStyle::new().color(SUCCESS))
                .line_style(LineStyle::new().type_(LineStyleType::Dashed))
                .data(counts),
        )
}

/// The colour of a payment/deposit category, grey for anything unexpected.
fn category_color(category: &str) -> &'static str {
    match category {
        "Deposits" => SUCCESS,
        "Payments" => DANGER,
        _ => SECONDARY,
    }
}

pub(super) fn payment_deposit_chart(categories: &[CategoryTotal]) -> Chart {
    let data: Vec<DataPointItem> = categories
        .iter()
        .map(|category| {
            DataPointItem::new(category.total_amount)
                .name(category.category.as_str())
                .item_style(ItemStyle::new().color(category_color(&category.category)))
        })
        .collect();

    Chart::new()
        .title(Title::new().text("Payments vs Deposits"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("2%"))
        .series(
            Pie::new()
                .name("Amount")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "value",
        &format!(
            "const amountFormatter = new Intl.NumberFormat('en-US', {{ maximumFractionDigits: 0 }});
            return amountFormatter.format(value) + ' {CURRENCY_LABEL}';"
        ),
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
