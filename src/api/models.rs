//! The payloads exchanged with the transaction API.

use serde::{Deserialize, Deserializer};

/// A JSON number, or a decimal number sent as text.
///
/// The API sends database DECIMAL columns as strings, so either form is
/// accepted wherever an amount is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn into_f64(self) -> Result<f64, String> {
        match self {
            NumberOrText::Number(number) => Ok(number),
            NumberOrText::Text(text) => text
                .trim()
                .parse()
                .map_err(|error| format!("invalid number \"{text}\": {error}")),
        }
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_f64(deserializer)?.unwrap_or_default())
}

fn lenient_optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrText>::deserialize(deserializer)?
        .map(NumberOrText::into_f64)
        .transpose()
        .map_err(serde::de::Error::custom)
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    // Counts never have a fractional part, the cast only drops the ".0" that
    // a DECIMAL count carries.
    Ok(lenient_f64(deserializer)?.max(0.0) as u64)
}

fn id_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Integer(i64),
        Text(String),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Integer(id) => id.to_string(),
        Id::Text(id) => id,
    })
}

/// A single mobile money transaction as recorded by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionRecord {
    #[serde(deserialize_with = "id_text")]
    pub transaction_id: String,
    /// The raw type, e.g. "BANK_DEPOSIT". Kept as text so types the dashboard
    /// does not know about still render.
    #[serde(default)]
    pub transaction_type: String,
    #[serde(default, deserialize_with = "lenient_optional_f64")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_optional_f64")]
    pub fee: Option<f64>,
    #[serde(default)]
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_f64")]
    pub balance: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One page of transactions matching a query.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TransactionPage {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total: u64,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub per_page: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_pages: u64,
}

/// Aggregate statistics over transactions with a positive amount.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Statistics {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_amount: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub max_amount: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_fees: f64,
    /// The day with the most transactions as `YYYY-MM-DD`.
    #[serde(default)]
    pub most_active_day: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub most_active_day_count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeBreakdown {
    pub transaction_type: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: u64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthlyTrend {
    /// The month as `YYYY-MM`.
    pub month: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: u64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub inflow: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub outflow: f64,
}

/// Totals for one of "Deposits", "Payments" or "Others".
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: u64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: f64,
}

/// Summary statistics over every stored transaction.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SummaryResponse {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_transactions: u64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_volume: f64,
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default)]
    pub by_type: Vec<TypeBreakdown>,
    #[serde(default)]
    pub monthly_trends: Vec<MonthlyTrend>,
    #[serde(default)]
    pub payment_deposit: Vec<CategoryTotal>,
}

/// The reply to an upload or clear request.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub processed_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{SummaryResponse, TransactionPage, TransactionRecord};

    #[test]
    fn accepts_decimal_strings_for_amounts() {
        let summary: SummaryResponse = serde_json::from_value(json!({
            "total_transactions": 3,
            "total_volume": "15000.00",
            "statistics": {
                "avg_amount": "5000.0000",
                "max_amount": 9000,
                "total_fees": "150.00",
                "most_active_day": "2025-01-05",
                "most_active_day_count": 2
            },
            "by_type": [
                {"transaction_type": "PAYMENT", "count": 2, "total_amount": "10000.00", "avg_amount": "5000"}
            ],
            "monthly_trends": [
                {"month": "2025-01", "count": 3, "total_amount": "15000.00", "inflow": "15000.00", "outflow": "0"}
            ],
            "payment_deposit": [
                {"category": "Payments", "count": 2, "total_amount": "10000.00"}
            ]
        }))
        .unwrap();

        assert_eq!(summary.total_volume, 15000.0);
        assert_eq!(summary.statistics.avg_amount, 5000.0);
        assert_eq!(summary.statistics.max_amount, 9000.0);
        assert_eq!(summary.by_type[0].total_amount, 10000.0);
        assert_eq!(summary.monthly_trends[0].inflow, 15000.0);
        assert_eq!(summary.payment_deposit[0].count, 2);
    }

    #[test]
    fn missing_page_fields_default_to_empty() {
        let page: TransactionPage = serde_json::from_value(json!({})).unwrap();

        assert_eq!(page.total, 0);
        assert!(page.transactions.is_empty());
    }

    #[test]
    fn null_amounts_and_numeric_ids_are_accepted() {
        let record: TransactionRecord = serde_json::from_value(json!({
            "transaction_id": 7,
            "transaction_type": "AIRTIME",
            "amount": null,
            "fee": "10.00",
            "transaction_date": "2025-01-14 10:00:00",
            "sender": null
        }))
        .unwrap();

        assert_eq!(record.transaction_id, "7");
        assert_eq!(record.amount, None);
        assert_eq!(record.fee, Some(10.0));
        assert_eq!(record.sender, None);
        assert_eq!(record.recipient, None);
    }

    #[test]
    fn rejects_text_that_is_not_a_number() {
        let result = serde_json::from_value::<SummaryResponse>(json!({
            "total_volume": "lots"
        }));

        assert!(result.is_err());
    }
}
