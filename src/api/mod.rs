//! The transaction API the dashboard reads from and sends uploads to.
//!
//! The API owns storage, filtering and aggregation; the dashboard only
//! displays what it returns.

mod client;
mod models;

use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, filters::TransactionType};

pub use client::HttpTransactionApi;
pub use models::{
    ApiMessage, CategoryTotal, MonthlyTrend, Statistics, SummaryResponse, TransactionPage,
    TransactionRecord, TypeBreakdown,
};

/// The query string for `GET /api/transactions`. Absent criteria are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionQuery {
    pub page: u64,
    pub per_page: u64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<u64>,
}

impl TransactionQuery {
    /// The first page with no filters applied.
    pub fn first_page(per_page: u64) -> Self {
        Self {
            page: 1,
            per_page,
            transaction_type: None,
            start_date: None,
            end_date: None,
            search: None,
            min_amount: None,
            max_amount: None,
        }
    }
}

/// A file picked by the user for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// The operations the dashboard needs from the transaction API.
pub trait TransactionApi: Clone + Send + Sync + 'static {
    /// `GET /api/summary`
    fn summary(&self) -> impl Future<Output = Result<SummaryResponse, Error>> + Send;

    /// `GET /api/transactions`
    fn transactions(
        &self,
        query: &TransactionQuery,
    ) -> impl Future<Output = Result<TransactionPage, Error>> + Send;

    /// `GET /api/transaction/{id}`
    fn transaction(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<TransactionRecord, Error>> + Send;

    /// `POST /upload`
    fn upload(&self, file: UploadFile) -> impl Future<Output = Result<ApiMessage, Error>> + Send;

    /// `POST /api/truncate`
    fn truncate(&self) -> impl Future<Output = Result<ApiMessage, Error>> + Send;
}

/// Decodes a response body that must be a JSON object.
pub(crate) fn decode_object<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|error| Error::MalformedResponse(format!("invalid JSON: {error}")))?;

    if !value.is_object() {
        return Err(Error::MalformedResponse(format!(
            "expected a JSON object, got {}",
            truncate(body)
        )));
    }

    serde_json::from_value(value)
        .map_err(|error| Error::MalformedResponse(format!("unexpected shape: {error}")))
}

/// Builds the error for a response with an error status.
///
/// The `error` field of a JSON body is kept as the message.
pub(crate) fn server_error(status: u16, body: &str) -> Error {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|error| error.as_str())
                .map(str::to_owned)
        });

    Error::ServerReportedError { status, message }
}

fn truncate(body: &str) -> String {
    const LIMIT: usize = 64;

    match body.char_indices().nth(LIMIT) {
        Some((index, _)) => format!("{}...", &body[..index]),
        None => body.to_owned(),
    }
}
