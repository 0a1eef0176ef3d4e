//! The filter criteria for the transaction list and the form they are read from.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month};

use crate::{
    api::TransactionQuery,
    format::{format_date, parse_date},
};

/// The transaction classes assigned by the transaction API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    MoneyReceived,
    CashPower,
    Airtime,
    BundlePurchase,
    BankDeposit,
    Withdrawal,
    Transfer,
    Payment,
    BankTransfer,
    ThirdParty,
}

impl TransactionType {
    /// Every transaction type, in the order they are offered in the filter.
    pub const ALL: [TransactionType; 10] = [
        Self::MoneyReceived,
        Self::CashPower,
        Self::Airtime,
        Self::BundlePurchase,
        Self::BankDeposit,
        Self::Withdrawal,
        Self::Transfer,
        Self::Payment,
        Self::BankTransfer,
        Self::ThirdParty,
    ];

    /// The value the API uses for this type, e.g. "MONEY_RECEIVED".
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::MoneyReceived => "MONEY_RECEIVED",
            Self::CashPower => "CASH_POWER",
            Self::Airtime => "AIRTIME",
            Self::BundlePurchase => "BUNDLE_PURCHASE",
            Self::BankDeposit => "BANK_DEPOSIT",
            Self::Withdrawal => "WITHDRAWAL",
            Self::Transfer => "TRANSFER",
            Self::Payment => "PAYMENT",
            Self::BankTransfer => "BANK_TRANSFER",
            Self::ThirdParty => "THIRD_PARTY",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|transaction_type| transaction_type.as_query_value() == text.trim())
            .ok_or_else(|| format!("unknown transaction type \"{text}\""))
    }
}

/// An inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first day in the range.
    pub start: Date,
    /// The last day in the range.
    pub end: Date,
}

impl DateRange {
    /// Creates a range from two dates in either order.
    pub fn new(first: Date, second: Date) -> Self {
        if first <= second {
            Self {
                start: first,
                end: second,
            }
        } else {
            Self {
                start: second,
                end: first,
            }
        }
    }

    /// Restricts both ends of the range to `bounds`.
    pub fn clamp_to(self, bounds: DateRange) -> Self {
        Self::new(
            self.start.clamp(bounds.start, bounds.end),
            self.end.clamp(bounds.start, bounds.end),
        )
    }
}

/// The days the range picker offers by default, counted back from the most
/// recent selectable date.
const DEFAULT_RANGE_DAYS: i64 = 30;

/// The span of dates the transaction data covers.
///
/// Date filters are clamped to this span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds(pub DateRange);

impl DateBounds {
    /// Creates the bounds from the first and last day of the data, in either
    /// order.
    pub fn new(earliest: Date, latest: Date) -> Self {
        Self(DateRange::new(earliest, latest))
    }

    /// The first selectable date.
    pub fn earliest(&self) -> Date {
        self.0.start
    }

    /// The last selectable date.
    pub fn latest(&self) -> Date {
        self.0.end
    }

    /// The range selected when the dashboard is first opened.
    pub fn default_range(&self) -> DateRange {
        DateRange::new(self.latest() - Duration::days(DEFAULT_RANGE_DAYS), self.latest())
            .clamp_to(self.0)
    }
}

/// Shortcuts offered next to the date inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateRangePreset {
    Last7Days,
    Last30Days,
    ThisMonth,
    LastMonth,
    AllTime,
}

impl DateRangePreset {
    pub const ALL: [DateRangePreset; 5] = [
        Self::Last7Days,
        Self::Last30Days,
        Self::ThisMonth,
        Self::LastMonth,
        Self::AllTime,
    ];

    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Last7Days => "last-7-days",
            Self::Last30Days => "last-30-days",
            Self::ThisMonth => "this-month",
            Self::LastMonth => "last-month",
            Self::AllTime => "all-time",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Last7Days => "Last 7 Days",
            Self::Last30Days => "Last 30 Days",
            Self::ThisMonth => "This Month",
            Self::LastMonth => "Last Month",
            Self::AllTime => "All Time",
        }
    }

    /// The dates covered by the preset, relative to the most recent date in
    /// `bounds` and clamped to `bounds`.
    pub fn range(self, bounds: &DateBounds) -> DateRange {
        let latest = bounds.latest();

        let range = match self {
            Self::Last7Days => DateRange::new(latest - Duration::days(6), latest),
            Self::Last30Days => DateRange::new(latest - Duration::days(29), latest),
            Self::ThisMonth => month_bounds(latest.year(), latest.month()),
            Self::LastMonth => {
                let last_month = latest - Duration::days(latest.day() as i64);
                month_bounds(last_month.year(), last_month.month())
            }
            Self::AllTime => bounds.0,
        };

        range.clamp_to(bounds.0)
    }
}

impl FromStr for DateRangePreset {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_query_value() == text.trim())
            .ok_or_else(|| format!("unknown date range preset \"{text}\""))
    }
}

fn month_bounds(year: i32, month: Month) -> DateRange {
    DateRange {
        start: Date::from_calendar_date(year, month, 1).expect("invalid month start date"),
        end: Date::from_calendar_date(year, month, last_day_of_month(year, month))
            .expect("invalid month end date"),
    }
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// The amount input the user just edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountField {
    #[default]
    Min,
    Max,
}

impl AmountField {
    /// The ID of the input element for this field.
    pub fn input_id(self) -> &'static str {
        match self {
            Self::Min => "min-amount",
            Self::Max => "max-amount",
        }
    }

    /// Maps the ID of the element that triggered a request to a field.
    pub fn from_input_id(id: &str) -> Option<Self> {
        match id {
            "min-amount" => Some(Self::Min),
            "max-amount" => Some(Self::Max),
            _ => None,
        }
    }
}

/// Keeps only the digits of an amount typed by the user.
pub fn sanitize_amount(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

fn parse_amount(text: &str) -> Option<u64> {
    let digits = sanitize_amount(text);

    if digits.is_empty() {
        None
    } else {
        Some(digits.parse().unwrap_or(u64::MAX))
    }
}

/// Sanitises the text of the amount inputs and keeps the minimum at or below
/// a nonzero maximum by changing the `edited` input.
///
/// Returns the new text of the minimum and maximum inputs.
pub fn clamp_amount_inputs(min: &str, max: &str, edited: AmountField) -> (String, String) {
    let min = sanitize_amount(min);
    let max = sanitize_amount(max);
    let min_value = parse_amount(&min).unwrap_or(0);
    let max_value = parse_amount(&max).unwrap_or(0);

    if min_value > max_value && max_value != 0 {
        match edited {
            AmountField::Min => (max_value.to_string(), max),
            AmountField::Max => (min, min_value.to_string()),
        }
    } else {
        (min, max)
    }
}

/// What the user has chosen to narrow the transaction list down to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub transaction_type: Option<TransactionType>,
    pub date_range: DateRange,
    pub search: String,
    pub min_amount: Option<u64>,
    pub max_amount: Option<u64>,
}

impl FilterCriteria {
    /// Criteria that match every transaction in `date_range`.
    pub fn new(date_range: DateRange) -> Self {
        Self {
            transaction_type: None,
            date_range,
            search: String::new(),
            min_amount: None,
            max_amount: None,
        }
    }

    /// Keeps the minimum amount at or below the maximum.
    ///
    /// A maximum of zero counts as "no maximum". When the minimum exceeds a
    /// nonzero maximum, the field the user just edited is pulled back to the
    /// value of the other one.
    pub fn clamp_amounts(&mut self, edited: AmountField) {
        let min = self.min_amount.unwrap_or(0);
        let max = self.max_amount.unwrap_or(0);

        if min > max && max != 0 {
            match edited {
                AmountField::Min => self.min_amount = Some(max),
                AmountField::Max => self.max_amount = Some(min),
            }
        }
    }

    /// The request for `page` of the transactions matching these criteria.
    pub fn to_query(&self, page: u64, per_page: u64) -> TransactionQuery {
        let search = self.search.trim();

        TransactionQuery {
            page,
            per_page,
            transaction_type: self.transaction_type,
            start_date: Some(format_date(self.date_range.start)),
            end_date: Some(format_date(self.date_range.end)),
            search: (!search.is_empty()).then(|| search.to_owned()),
            min_amount: self.min_amount,
            max_amount: self.max_amount,
        }
    }
}

/// The raw values of the filter form.
///
/// Every field is kept as text so that a half-typed value never rejects the
/// whole request.
#[derive(Debug, Default, Deserialize)]
pub struct FilterForm {
    #[serde(default, rename = "type")]
    pub transaction_type: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub preset: String,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub min_amount: String,
    #[serde(default)]
    pub max_amount: String,
}

impl FilterForm {
    /// The preset the user picked, if any.
    pub fn preset(&self) -> Option<DateRangePreset> {
        if self.preset.trim().is_empty() {
            return None;
        }

        self.preset
            .parse()
            .inspect_err(|error| tracing::warn!("ignoring date range preset: {error}"))
            .ok()
    }

    /// Reads the form into filter criteria.
    ///
    /// Values that cannot be understood fall back to those in `current`, dates
    /// are clamped to `bounds`, and a preset overrides the date inputs.
    pub fn to_criteria(
        &self,
        current: &FilterCriteria,
        bounds: &DateBounds,
        edited: AmountField,
    ) -> FilterCriteria {
        let transaction_type = if self.transaction_type.trim().is_empty() {
            None
        } else {
            self.transaction_type
                .parse::<TransactionType>()
                .map(Some)
                .inspect_err(|error| tracing::warn!("ignoring type filter: {error}"))
                .unwrap_or(current.transaction_type)
        };

        let date_range = match self.preset() {
            Some(preset) => preset.range(bounds),
            None => DateRange::new(
                parse_date(&self.start_date).unwrap_or(current.date_range.start),
                parse_date(&self.end_date).unwrap_or(current.date_range.end),
            )
            .clamp_to(bounds.0),
        };

        let mut criteria = FilterCriteria {
            transaction_type,
            date_range,
            search: self.search.trim().to_owned(),
            min_amount: parse_amount(&self.min_amount),
            max_amount: parse_amount(&self.max_amount),
        };
        criteria.clamp_amounts(edited);

        criteria
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{
        AmountField, DateBounds, DateRange, DateRangePreset, FilterCriteria, FilterForm,
        TransactionType, clamp_amount_inputs, sanitize_amount,
    };

    fn bounds() -> DateBounds {
        DateBounds::new(date!(2024 - 05 - 10), date!(2025 - 01 - 16))
    }

    fn criteria() -> FilterCriteria {
        FilterCriteria::new(bounds().default_range())
    }

    #[test]
    fn default_range_is_thirty_days_before_latest_date() {
        assert_eq!(
            bounds().default_range(),
            DateRange {
                start: date!(2024 - 12 - 17),
                end: date!(2025 - 01 - 16)
            }
        );
    }

    #[test]
    fn presets_count_back_from_latest_date() {
        let bounds = bounds();

        assert_eq!(
            DateRangePreset::Last7Days.range(&bounds),
            DateRange::new(date!(2025 - 01 - 10), date!(2025 - 01 - 16))
        );
        assert_eq!(
            DateRangePreset::Last30Days.range(&bounds),
            DateRange::new(date!(2024 - 12 - 18), date!(2025 - 01 - 16))
        );
        assert_eq!(
            DateRangePreset::LastMonth.range(&bounds),
            DateRange::new(date!(2024 - 12 - 01), date!(2024 - 12 - 31))
        );
        assert_eq!(
            DateRangePreset::AllTime.range(&bounds),
            DateRange::new(date!(2024 - 05 - 10), date!(2025 - 01 - 16))
        );
    }

    #[test]
    fn this_month_is_clamped_to_latest_date() {
        assert_eq!(
            DateRangePreset::ThisMonth.range(&bounds()),
            DateRange::new(date!(2025 - 01 - 01), date!(2025 - 01 - 16))
        );
    }

    #[test]
    fn min_amount_is_clamped_to_nonzero_max() {
        let mut criteria = criteria();
        criteria.min_amount = Some(5000);
        criteria.max_amount = Some(1000);

        criteria.clamp_amounts(AmountField::Min);

        assert_eq!(criteria.min_amount, Some(1000));
        assert_eq!(criteria.max_amount, Some(1000));
    }

    #[test]
    fn max_amount_is_raised_to_min_when_edited() {
        let mut criteria = criteria();
        criteria.min_amount = Some(5000);
        criteria.max_amount = Some(1000);

        criteria.clamp_amounts(AmountField::Max);

        assert_eq!(criteria.min_amount, Some(5000));
        assert_eq!(criteria.max_amount, Some(5000));
    }

    #[test]
    fn zero_or_missing_max_does_not_clamp() {
        let mut criteria = criteria();
        criteria.min_amount = Some(5000);
        criteria.max_amount = Some(0);
        criteria.clamp_amounts(AmountField::Min);
        assert_eq!(criteria.min_amount, Some(5000));

        criteria.max_amount = None;
        criteria.clamp_amounts(AmountField::Min);
        assert_eq!(criteria.min_amount, Some(5000));
    }

    #[test]
    fn strips_non_digits_from_amounts() {
        assert_eq!(sanitize_amount("1,500 RWF"), "1500");
        assert_eq!(sanitize_amount("-20.5"), "205");
        assert_eq!(sanitize_amount("abc"), "");
    }

    #[test]
    fn amount_inputs_are_sanitised_and_clamped() {
        assert_eq!(
            clamp_amount_inputs("5,000", "1000", AmountField::Min),
            ("1000".to_owned(), "1000".to_owned())
        );
        assert_eq!(
            clamp_amount_inputs("5000", "10x", AmountField::Max),
            ("5000".to_owned(), "5000".to_owned())
        );
        assert_eq!(
            clamp_amount_inputs("5000", "", AmountField::Min),
            ("5000".to_owned(), String::new())
        );
        assert_eq!(
            clamp_amount_inputs("12a", "0", AmountField::Min),
            ("12".to_owned(), "0".to_owned())
        );
    }

    #[test]
    fn parses_transaction_types() {
        assert_eq!(
            "BANK_DEPOSIT".parse::<TransactionType>(),
            Ok(TransactionType::BankDeposit)
        );
        assert!("MOBILE_MONEY".parse::<TransactionType>().is_err());
        assert_eq!(TransactionType::ThirdParty.to_string(), "THIRD_PARTY");
    }

    #[test]
    fn form_is_read_into_criteria() {
        let form: FilterForm = serde_html_form::from_str(
            "type=PAYMENT&start_date=2024-06-01&end_date=2024-06-30\
            &search=+Jane+&min_amount=100&max_amount=2%2C000",
        )
        .unwrap();

        let got = form.to_criteria(&criteria(), &bounds(), AmountField::Min);

        assert_eq!(got.transaction_type, Some(TransactionType::Payment));
        assert_eq!(
            got.date_range,
            DateRange::new(date!(2024 - 06 - 01), date!(2024 - 06 - 30))
        );
        assert_eq!(got.search, "Jane");
        assert_eq!(got.min_amount, Some(100));
        assert_eq!(got.max_amount, Some(2000));
    }

    #[test]
    fn empty_form_clears_optional_criteria() {
        let form: FilterForm = serde_html_form::from_str("").unwrap();
        let current = criteria();

        let got = form.to_criteria(&current, &bounds(), AmountField::Min);

        assert_eq!(got, FilterCriteria::new(current.date_range));
    }

    #[test]
    fn invalid_form_values_fall_back() {
        let form: FilterForm =
            serde_html_form::from_str("type=BOGUS&start_date=yesterday&end_date=2030-01-01")
                .unwrap();
        let current = FilterCriteria {
            transaction_type: Some(TransactionType::Airtime),
            ..criteria()
        };

        let got = form.to_criteria(&current, &bounds(), AmountField::Min);

        assert_eq!(got.transaction_type, Some(TransactionType::Airtime));
        assert_eq!(got.date_range.start, current.date_range.start);
        assert_eq!(got.date_range.end, date!(2025 - 01 - 16));
    }

    #[test]
    fn reversed_dates_are_swapped() {
        let form: FilterForm =
            serde_html_form::from_str("start_date=2024-09-30&end_date=2024-09-01").unwrap();

        let got = form.to_criteria(&criteria(), &bounds(), AmountField::Min);

        assert_eq!(
            got.date_range,
            DateRange {
                start: date!(2024 - 09 - 01),
                end: date!(2024 - 09 - 30)
            }
        );
    }

    #[test]
    fn preset_overrides_date_inputs() {
        let form: FilterForm = serde_html_form::from_str(
            "start_date=2024-06-01&end_date=2024-06-30&preset=last-7-days",
        )
        .unwrap();

        let got = form.to_criteria(&criteria(), &bounds(), AmountField::Min);

        assert_eq!(
            got.date_range,
            DateRange::new(date!(2025 - 01 - 10), date!(2025 - 01 - 16))
        );
    }

    #[test]
    fn query_omits_absent_criteria() {
        let query = criteria().to_query(2, 10);

        assert_eq!(query.page, 2);
        assert_eq!(query.per_page, 10);
        assert_eq!(query.transaction_type, None);
        assert_eq!(query.start_date.as_deref(), Some("2024-12-17"));
        assert_eq!(query.end_date.as_deref(), Some("2025-01-16"));
        assert_eq!(query.search, None);
        assert_eq!(query.min_amount, None);
    }
}
