//! Uploading SMS exports and clearing every stored transaction.

use axum::{
    extract::{Multipart, State, multipart::Field},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::{ALERT_CONTAINER_ID, Notification},
    api::{TransactionApi, UploadFile},
    endpoints,
    html::{BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, loading_spinner},
};

use super::{
    MODAL_CONTAINER_ID,
    handlers::transactions_fragment,
    loader::{load_summary, load_transactions},
    tables::{CLOSE_MODAL_SCRIPT, modal},
    views::{UploadStatus, summary_section, upload_status_view},
};

/// The name of the file input of the upload form.
const FILE_FIELD: &str = "file";

/// Reloads the summary and the transactions and renders both as out-of-band
/// swaps. Superseded loads are left out.
async fn refreshed_sections<A: TransactionApi>(state: &AppState<A>) -> Result<Markup, Error> {
    let (summary, transactions) = tokio::join!(load_summary(state), load_transactions(state));
    let summary = summary?;
    let transactions = transactions?;

    Ok(html! {
        @if let Some(summary) = &summary {
            (summary_section(summary, true))
        }

        @if let Some(transactions) = &transactions {
            (transactions_fragment(transactions, true))
        }
    })
}

async fn read_upload_field(field: Field<'_>) -> Result<Option<UploadFile>, Error> {
    let file_name = field.file_name().unwrap_or_default().to_owned();
    let content_type = field.content_type().map(str::to_owned);

    if file_name.is_empty() {
        return Ok(None);
    }

    let bytes = field.bytes().await.map_err(|error| {
        tracing::error!("Could not read uploaded file {file_name}: {error}");
        Error::UserInputError("Could not read the uploaded file.".to_owned())
    })?;

    Ok(Some(UploadFile {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

/// Finds the file picked in the upload form, if any.
async fn find_upload(multipart: &mut Multipart) -> Result<Option<UploadFile>, Error> {
    while let Some(field) = multipart.next_field().await.map_err(|error| {
        tracing::error!("Could not read multipart form: {error}");
        Error::UserInputError("Could not read the upload form.".to_owned())
    })? {
        if field.name() == Some(FILE_FIELD) {
            return read_upload_field(field).await;
        }
    }

    Ok(None)
}

/// Send the picked SMS export to the transaction API and refresh the
/// dashboard.
///
/// The response replaces the upload status text; the refreshed sections are
/// swapped in out of band. Submitting without a file is rejected before the
/// transaction API is contacted.
pub async fn upload_file<A: TransactionApi>(
    State(state): State<AppState<A>>,
    mut multipart: Multipart,
) -> Response {
    let file = match find_upload(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => {
            return Error::UserInputError("Please select a file to upload".to_owned())
                .into_alert_response();
        }
        Err(error) => return error.into_alert_response(),
    };

    tracing::info!("Uploading {} ({} bytes)", file.file_name, file.bytes.len());

    match state.api.upload(file).await {
        Ok(reply) => {
            tracing::info!(
                "Upload processed {} transactions",
                reply.processed_count.unwrap_or_default()
            );

            match state.lock_dashboard() {
                Ok(mut dashboard) => dashboard.reset_page(),
                Err(error) => return error.into_alert_response(),
            }

            let sections = match refreshed_sections(&state).await {
                Ok(sections) => sections,
                Err(error) => return error.into_alert_response(),
            };

            html! {
                (upload_status_view(Some(&UploadStatus::Succeeded)))
                (sections)
            }
            .into_response()
        }
        Err(error) => {
            tracing::error!("Upload failed: {error}");
            upload_status_view(Some(&UploadStatus::Failed(
                error.server_message_or("Upload failed"),
            )))
            .into_response()
        }
    }
}

fn clear_confirmation_modal() -> Markup {
    modal(
        "clear-modal",
        "Clear All Transactions",
        html! {
            p { "This permanently deletes every stored transaction. Are you sure?" }
        },
        html! {
            button type="button" class=(BUTTON_SECONDARY_STYLE) onclick=(CLOSE_MODAL_SCRIPT)
            {
                "Cancel"
            }

            form
                hx-post=(endpoints::DASHBOARD_CLEAR)
                hx-target={ "#" (MODAL_CONTAINER_ID) }
                hx-target-error={ "#" (ALERT_CONTAINER_ID) }
            {
                input type="hidden" name="confirm" value="yes";

                button type="submit" class=(BUTTON_DELETE_STYLE)
                {
                    (loading_spinner())
                    "Clear"
                }
            }
        },
    )
}

/// Ask for confirmation before clearing, or report that there is nothing to
/// clear.
pub async fn get_clear_confirmation<A: TransactionApi>(
    State(state): State<AppState<A>>,
) -> Result<Response, Error> {
    let has_transactions = state.lock_dashboard()?.has_transactions();

    if has_transactions {
        Ok(clear_confirmation_modal().into_response())
    } else {
        Ok(Notification::danger("No transaction found")
            .into_oob_html()
            .into_response())
    }
}

/// The confirmation sent by the clear dialog.
#[derive(Debug, Default, Deserialize)]
pub struct ClearForm {
    #[serde(default)]
    pub confirm: String,
}

/// Delete every stored transaction and refresh the dashboard.
///
/// The response body is empty, which closes the confirmation dialog.
pub async fn clear_transactions<A: TransactionApi>(
    State(state): State<AppState<A>>,
    Form(form): Form<ClearForm>,
) -> Result<Response, Error> {
    if form.confirm != "yes" {
        return Err(Error::UserInputError(
            "Confirm the request to clear all transactions".to_owned(),
        ));
    }

    match state.api.truncate().await {
        Ok(_) => {
            tracing::info!("Cleared all transactions");
            state.lock_dashboard()?.mark_cleared();
            let sections = refreshed_sections(&state).await?;

            Ok(html! {
                (sections)
                (Notification::info("All transactions cleared").into_oob_html())
            }
            .into_response())
        }
        Err(error) => {
            tracing::error!("Failed to clear transactions: {error}");

            Ok(Notification::danger(&error.server_message_or("Failed to clear transactions"))
                .into_oob_html()
                .into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode};
    use axum_extra::extract::Form;
    use scraper::Selector;

    use crate::{
        AppState, Error,
        api::ApiMessage,
        config::DashboardConfig,
        dashboard::{handlers::get_initial_load, state::LoadStatus},
        test_utils::{
            FakeApi, assert_status_ok, element_text, must_make_multipart, parse_html_fragment,
            sample_page, sample_summary,
        },
    };

    use super::{ClearForm, clear_transactions, get_clear_confirmation, upload_file};

    fn app_state(api: FakeApi) -> AppState<FakeApi> {
        AppState::new(api, DashboardConfig::default())
    }

    fn processed(count: u64) -> ApiMessage {
        ApiMessage {
            message: Some("File processed successfully".to_owned()),
            processed_count: Some(count),
        }
    }

    #[tokio::test]
    async fn upload_sends_file_and_refreshes() {
        let api = FakeApi::new();
        api.push_upload(Ok(processed(2)));
        api.push_summary(Ok(sample_summary()));
        api.push_transactions(Ok(sample_page(2, 2)));
        let state = app_state(api.clone());

        let response = upload_file(
            State(state),
            must_make_multipart(&[("file", "sms.xml", "<smses></smses>")]).await,
        )
        .await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_eq!(
            element_text(&html, "#upload-status"),
            "File processed successfully!"
        );
        assert_eq!(
            element_text(&html, "#summary-section[hx-swap-oob] #total-transactions"),
            "1,250"
        );
        assert!(
            html.select(&Selector::parse("#transactions-section[hx-swap-oob]").unwrap())
                .next()
                .is_some()
        );

        let uploads = api.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].file_name, "sms.xml");
        assert_eq!(uploads[0].bytes, b"<smses></smses>");
    }

    #[tokio::test]
    async fn upload_without_file_is_rejected() {
        let api = FakeApi::new();
        let state = app_state(api.clone());

        let response = upload_file(
            State(state),
            must_make_multipart(&[("file", "", "")]).await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        assert_eq!(
            element_text(&html, ".alert span"),
            "Please select a file to upload"
        );
        assert!(api.uploads().is_empty());
    }

    #[tokio::test]
    async fn upload_failure_shows_server_message() {
        let api = FakeApi::new();
        api.push_upload(Err(Error::ServerReportedError {
            status: 400,
            message: Some("Invalid file type. Please upload an XML file.".to_owned()),
        }));
        let state = app_state(api.clone());

        let response = upload_file(
            State(state),
            must_make_multipart(&[("file", "notes.txt", "hello")]).await,
        )
        .await;

        let html = parse_html_fragment(response).await;
        assert_eq!(
            element_text(&html, "#upload-status.text-danger"),
            "Invalid file type. Please upload an XML file."
        );
        assert_eq!(api.transaction_queries().len(), 0);
    }

    #[tokio::test]
    async fn upload_failure_without_message_uses_fallback() {
        let api = FakeApi::new();
        api.push_upload(Err(Error::NetworkError("connection reset".to_owned())));
        let state = app_state(api);

        let response = upload_file(
            State(state),
            must_make_multipart(&[("file", "sms.xml", "<smses/>")]).await,
        )
        .await;

        let html = parse_html_fragment(response).await;
        assert_eq!(element_text(&html, "#upload-status"), "Upload failed");
    }

    #[tokio::test]
    async fn clear_without_transactions_reports_nothing_to_clear() {
        let state = app_state(FakeApi::new());

        let response = get_clear_confirmation(State(state)).await.unwrap();

        let html = parse_html_fragment(response).await;
        assert_eq!(element_text(&html, ".notification"), "No transaction found");
        assert!(
            html.select(&Selector::parse(".modal").unwrap())
                .next()
                .is_none()
        );
    }

    #[tokio::test]
    async fn clear_with_transactions_asks_for_confirmation() {
        let state = app_state(FakeApi::new());
        state.lock_dashboard().unwrap().status = LoadStatus::Loaded;

        let response = get_clear_confirmation(State(state)).await.unwrap();

        let html = parse_html_fragment(response).await;
        let form = html
            .select(&Selector::parse("#clear-modal form").unwrap())
            .next()
            .expect("confirmation form not found");
        assert_eq!(form.value().attr("hx-post"), Some("/dashboard/clear"));
    }

    #[tokio::test]
    async fn clear_requires_confirmation() {
        let api = FakeApi::new();
        let state = app_state(api.clone());

        let result = clear_transactions(State(state), Form(ClearForm::default())).await;

        assert!(matches!(result, Err(Error::UserInputError(_))));
        assert_eq!(api.truncate_calls(), 0);
    }

    #[tokio::test]
    async fn clear_reports_success_instead_of_empty_result() {
        let api = FakeApi::new();
        api.push_truncate(Ok(ApiMessage {
            message: Some("All transactions deleted".to_owned()),
            processed_count: None,
        }));
        api.push_summary(Ok(Default::default()));
        api.push_transactions(Ok(sample_page(0, 0)));
        let state = app_state(api.clone());

        let response = clear_transactions(
            State(state.clone()),
            Form(ClearForm {
                confirm: "yes".to_owned(),
            }),
        )
        .await
        .unwrap();

        let html = parse_html_fragment(response).await;
        let notifications: Vec<String> = html
            .select(&Selector::parse(".notification").unwrap())
            .map(|notification| notification.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(notifications, ["All transactions cleared"]);
        assert_eq!(api.truncate_calls(), 1);
        assert_eq!(state.lock_dashboard().unwrap().status, LoadStatus::Empty);
    }

    #[tokio::test]
    async fn clear_failure_shows_server_message() {
        let api = FakeApi::new();
        api.push_truncate(Err(Error::ServerReportedError {
            status: 500,
            message: None,
        }));
        let state = app_state(api.clone());

        let response = clear_transactions(
            State(state),
            Form(ClearForm {
                confirm: "yes".to_owned(),
            }),
        )
        .await
        .unwrap();

        let html = parse_html_fragment(response).await;
        assert_eq!(
            element_text(&html, ".notification"),
            "Failed to clear transactions"
        );
        assert!(api.transaction_queries().is_empty());
    }

    #[tokio::test]
    async fn clear_only_silences_the_next_empty_load() {
        let api = FakeApi::new();
        api.push_truncate(Ok(ApiMessage::default()));
        api.push_summary(Ok(Default::default()));
        api.push_transactions(Ok(sample_page(0, 0)));
        api.push_summary(Ok(Default::default()));
        api.push_transactions(Ok(sample_page(0, 0)));
        let state = app_state(api);

        clear_transactions(
            State(state.clone()),
            Form(ClearForm {
                confirm: "yes".to_owned(),
            }),
        )
        .await
        .unwrap();
        let response = get_initial_load(State(state)).await.unwrap();

        let html = parse_html_fragment(response).await;
        assert_eq!(element_text(&html, ".notification"), "No transaction found");
    }
}
