//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState,
    api::TransactionApi,
    dashboard::{
        apply_filters, clear_transactions, get_clear_confirmation, get_dashboard_page,
        get_filtered_transactions, get_initial_load, get_summary, get_transaction_details,
        get_transactions_page, update_amount_range, upload_file,
    },
    endpoints,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router<A: TransactionApi>(state: AppState<A>) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_dashboard_page::<A>))
        .route(endpoints::DASHBOARD_INITIAL, get(get_initial_load::<A>))
        .route(
            endpoints::DASHBOARD_TRANSACTIONS,
            get(get_filtered_transactions::<A>),
        )
        .route(
            endpoints::DASHBOARD_TRANSACTIONS_PAGE,
            get(get_transactions_page::<A>),
        )
        .route(
            endpoints::DASHBOARD_TRANSACTION,
            get(get_transaction_details::<A>),
        )
        .route(endpoints::DASHBOARD_SUMMARY, get(get_summary::<A>))
        .route(endpoints::DASHBOARD_APPLY_FILTERS, get(apply_filters::<A>))
        .route(endpoints::DASHBOARD_AMOUNT_RANGE, post(update_amount_range::<A>))
        .route(endpoints::DASHBOARD_UPLOAD, post(upload_file::<A>))
        .route(
            endpoints::DASHBOARD_CLEAR,
            get(get_clear_confirmation::<A>).post(clear_transactions::<A>),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderName, HeaderValue};
    use axum_test::TestServer;
    use scraper::{Html, Selector};

    use crate::{
        AppState,
        config::DashboardConfig,
        test_utils::{FakeApi, sample_page, sample_record, sample_summary},
    };

    use super::build_router;

    fn test_server(api: FakeApi) -> TestServer {
        let app = build_router(AppState::new(api, DashboardConfig::default()));

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn root_serves_dashboard_page() {
        let server = test_server(FakeApi::new());

        let response = server.get("/").await;

        response.assert_status_ok();
        let html = Html::parse_document(&response.text());
        assert!(
            html.select(&Selector::parse("#dashboard-content").unwrap())
                .next()
                .is_some()
        );
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let server = test_server(FakeApi::new());

        server.get("/api/summary").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn filter_query_reaches_transaction_api() {
        let api = FakeApi::new();
        api.push_transactions(Ok(sample_page(1, 1)));
        let server = test_server(api.clone());

        server
            .get("/dashboard/transactions")
            .add_query_param("type", "CASH_POWER")
            .add_query_param("start_date", "2025-01-01")
            .add_query_param("end_date", "2025-01-16")
            .add_query_param("search", "")
            .add_query_param("max_amount", "50000")
            .await
            .assert_status_ok();

        let query = &api.transaction_queries()[0];
        assert_eq!(
            serde_urlencoded::to_string(query).unwrap(),
            "page=1&per_page=10&type=CASH_POWER&start_date=2025-01-01&end_date=2025-01-16&max_amount=50000"
        );
    }

    #[tokio::test]
    async fn details_route_passes_transaction_id() {
        let api = FakeApi::new();
        api.push_transaction(Ok(sample_record("ABC-123")));
        let server = test_server(api.clone());

        server
            .get("/dashboard/transactions/ABC-123")
            .await
            .assert_status_ok();

        assert_eq!(api.requested_ids(), ["ABC-123"]);
    }

    #[tokio::test]
    async fn amount_route_reads_trigger_header() {
        let server = test_server(FakeApi::new());

        let response = server
            .post("/dashboard/filters/amount")
            .add_header(
                HeaderName::from_static("hx-trigger"),
                HeaderValue::from_static("max-amount"),
            )
            .form(&[("min_amount", "900"), ("max_amount", "40a0")])
            .await;

        response.assert_status_ok();
        let html = Html::parse_fragment(&response.text());
        let max = html
            .select(&Selector::parse("#max-amount").unwrap())
            .next()
            .unwrap();
        assert_eq!(max.value().attr("value"), Some("900"));
    }

    #[tokio::test]
    async fn initial_load_route_renders_sections() {
        let api = FakeApi::new();
        api.push_summary(Ok(sample_summary()));
        api.push_transactions(Ok(sample_page(3, 3)));
        let server = test_server(api);

        let response = server.get("/dashboard/initial").await;

        response.assert_status_ok();
        let html = Html::parse_fragment(&response.text());
        assert_eq!(
            html.select(&Selector::parse("#transactions-table tr").unwrap())
                .count(),
            3
        );
    }
}
