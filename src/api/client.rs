use reqwest::{
    Client as HttpClient, Response, Url,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;

use crate::Error;

use super::{
    ApiMessage, SummaryResponse, TransactionApi, TransactionPage, TransactionQuery,
    TransactionRecord, UploadFile, decode_object, server_error,
};

/// Talks to the transaction API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransactionApi {
    http_client: HttpClient,
    base_url: String,
}

impl HttpTransactionApi {
    /// Where the transaction API listens when run locally.
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:5001";

    /// Create a client for the API served at `base_url`, e.g.
    /// "http://127.0.0.1:5001".
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// The URL requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<Response, Error> {
        request.send().await.map_err(map_transport_error)
    }

    /// Reads the body of `response` and decodes it, or the error it reports.
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            tracing::warn!("Transaction API returned {status}: {body}");
            return Err(server_error(status.as_u16(), &body));
        }

        decode_object(&body).inspect_err(|error| tracing::warn!("{error}"))
    }
}

fn map_transport_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::NetworkTimeout
    } else {
        Error::NetworkError(error.to_string())
    }
}

impl TransactionApi for HttpTransactionApi {
    async fn summary(&self) -> Result<SummaryResponse, Error> {
        let response = Self::send(self.http_client.get(self.url("/api/summary"))).await?;

        Self::read_json(response).await
    }

    async fn transactions(&self, query: &TransactionQuery) -> Result<TransactionPage, Error> {
        let query_string = serde_urlencoded::to_string(query)
            .map_err(|error| Error::UserInputError(format!("invalid query: {error}")))?;
        let url = format!("{}?{query_string}", self.url("/api/transactions"));

        let response = Self::send(self.http_client.get(url)).await?;

        Self::read_json(response).await
    }

    async fn transaction(&self, id: &str) -> Result<TransactionRecord, Error> {
        let mut url = Url::parse(&self.url("/api/transaction"))
            .map_err(|error| Error::NetworkError(format!("invalid API URL: {error}")))?;
        url.path_segments_mut()
            .map_err(|_| Error::NetworkError("the API URL cannot have a path".to_owned()))?
            .push(id);

        let response = Self::send(self.http_client.get(url)).await?;

        Self::read_json(response).await
    }

    async fn upload(&self, file: UploadFile) -> Result<ApiMessage, Error> {
        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(content_type) = file.content_type {
            part = part
                .mime_str(&content_type)
                .map_err(|error| Error::UserInputError(format!("invalid file type: {error}")))?;
        }
        let form = Form::new().part("file", part);

        let response =
            Self::send(self.http_client.post(self.url("/upload")).multipart(form)).await?;

        Self::read_json(response).await
    }

    async fn truncate(&self) -> Result<ApiMessage, Error> {
        let response = Self::send(self.http_client.post(self.url("/api/truncate"))).await?;

        Self::read_json(response).await
    }
}
