use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::{
    Error,
    api::{
        ApiMessage, SummaryResponse, TransactionApi, TransactionPage, TransactionQuery,
        TransactionRecord, UploadFile,
    },
};

/// Scripted responses and recorded calls.
#[derive(Debug, Default)]
struct Script {
    summaries: VecDeque<Result<SummaryResponse, Error>>,
    pages: VecDeque<Result<TransactionPage, Error>>,
    records: VecDeque<Result<TransactionRecord, Error>>,
    upload_replies: VecDeque<Result<ApiMessage, Error>>,
    truncate_replies: VecDeque<Result<ApiMessage, Error>>,
    delay: Duration,
    summary_calls: usize,
    transaction_queries: Vec<TransactionQuery>,
    requested_ids: Vec<String>,
    uploads: Vec<UploadFile>,
    truncate_calls: usize,
}

/// A transaction API that replays queued responses in order.
///
/// A call with nothing queued fails with [Error::NetworkError], as if the
/// backend were down. Every call is recorded before the optional delay so that
/// a call abandoned by a timeout still counts.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeApi {
    script: Arc<Mutex<Script>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().expect("fake API lock poisoned")
    }

    pub(crate) fn push_summary(&self, response: Result<SummaryResponse, Error>) {
        self.script().summaries.push_back(response);
    }

    pub(crate) fn push_transactions(&self, response: Result<TransactionPage, Error>) {
        self.script().pages.push_back(response);
    }

    pub(crate) fn push_transaction(&self, response: Result<TransactionRecord, Error>) {
        self.script().records.push_back(response);
    }

    pub(crate) fn push_upload(&self, response: Result<ApiMessage, Error>) {
        self.script().upload_replies.push_back(response);
    }

    pub(crate) fn push_truncate(&self, response: Result<ApiMessage, Error>) {
        self.script().truncate_replies.push_back(response);
    }

    /// Makes every later call wait `delay` before answering.
    pub(crate) fn set_delay(&self, delay: Duration) {
        self.script().delay = delay;
    }

    pub(crate) fn summary_calls(&self) -> usize {
        self.script().summary_calls
    }

    pub(crate) fn transaction_queries(&self) -> Vec<TransactionQuery> {
        self.script().transaction_queries.clone()
    }

    pub(crate) fn requested_ids(&self) -> Vec<String> {
        self.script().requested_ids.clone()
    }

    pub(crate) fn uploads(&self) -> Vec<UploadFile> {
        self.script().uploads.clone()
    }

    pub(crate) fn truncate_calls(&self) -> usize {
        self.script().truncate_calls
    }

    async fn reply<T>(&self, next: impl FnOnce(&mut Script) -> Option<Result<T, Error>>) -> Result<T, Error> {
        let (response, delay) = {
            let mut script = self.script();
            let response = next(&mut script);
            (response, script.delay)
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        response.unwrap_or_else(|| Err(Error::NetworkError("connection refused".to_owned())))
    }
}

impl TransactionApi for FakeApi {
    async fn summary(&self) -> Result<SummaryResponse, Error> {
        self.reply(|script| {
            script.summary_calls += 1;
            script.summaries.pop_front()
        })
        .await
    }

    async fn transactions(&self, query: &TransactionQuery) -> Result<TransactionPage, Error> {
        let query = query.clone();

        self.reply(move |script| {
            script.transaction_queries.push(query);
            script.pages.pop_front()
        })
        .await
    }

    async fn transaction(&self, id: &str) -> Result<TransactionRecord, Error> {
        let id = id.to_owned();

        self.reply(move |script| {
            script.requested_ids.push(id);
            script.records.pop_front()
        })
        .await
    }

    async fn upload(&self, file: UploadFile) -> Result<ApiMessage, Error> {
        self.reply(move |script| {
            script.uploads.push(file);
            script.upload_replies.pop_front()
        })
        .await
    }

    async fn truncate(&self) -> Result<ApiMessage, Error> {
        self.reply(|script| {
            script.truncate_calls += 1;
            script.truncate_replies.pop_front()
        })
        .await
    }
}
