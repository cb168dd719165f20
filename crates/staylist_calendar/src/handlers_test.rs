#[cfg(test)]
mod tests {
    use crate::board::{CalendarBoard, SharedBoard};
    use crate::handlers::CalendarState;
    use crate::reconciler::{AvailabilityReconciler, Notifier};
    use crate::routes::routes;
    use crate::store_mock::{record, CollectingNotifier, MockListingStore};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use staylist_common::{
        DataSource, ListingFilter, ListingPage, ListingRecord, ListingStore, StoreError,
    };
    use staylist_config::AppConfig;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(records: Vec<ListingRecord>) -> (Router, Arc<MockListingStore>) {
        let board = SharedBoard::new(CalendarBoard::from_page(
            &ListingPage {
                listings: records.clone(),
                source: DataSource::Primary,
            },
            ListingFilter::default(),
        ));
        let store = Arc::new(MockListingStore::with_records(records));
        let store_dyn: Arc<dyn ListingStore> = store.clone();
        let notifier: Arc<dyn Notifier> = Arc::new(CollectingNotifier::default());
        let state = Arc::new(CalendarState {
            config: Arc::new(AppConfig::default()),
            reconciler: AvailabilityReconciler::new(store_dyn, board, notifier),
        });
        (routes(state), store)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_calendar_returns_month_grid() {
        let (app, _) = app(vec![record(1, "2024-06-01", "2024-06-02")]);
        let request = Request::builder()
            .uri("/calendar?year=2024&month=6")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["days"].as_array().unwrap().len(), 30);
        assert_eq!(body["source"], "primary");
        assert_eq!(body["rows"][0]["listing_id"], 1);
        assert_eq!(body["rows"][0]["cells"][0], "admin-blocked");
        assert_eq!(body["rows"][0]["cells"][1], "host-blocked");
        assert_eq!(body["rows"][0]["cells"][2], "available");
    }

    #[tokio::test]
    async fn test_get_calendar_rejects_bad_month() {
        let (app, _) = app(Vec::new());
        let request = Request::builder()
            .uri("/calendar?year=2024&month=13")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 400);
    }

    #[tokio::test]
    async fn test_block_returns_confirmed_report() {
        let (app, store) = app(vec![record(7, "", "")]);
        let request = post(
            "/calendar/block",
            json!({ "listing_id": 7, "dates": ["2024-06-03", "2024-06-04"], "actor": "host" }),
        );

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["listing_id"], 7);
        assert_eq!(body["outcome"], "confirmed");
        assert_eq!(body["actor"], "host");
        assert_eq!(store.stored(7).host_blocked_days_raw, "2024-06-03,2024-06-04");
    }

    #[tokio::test]
    async fn test_unblock_failure_maps_to_bad_gateway() {
        let (app, store) = app(vec![record(7, "2024-06-03", "")]);
        store.fail_next_update(StoreError::Network("timeout".to_string()));

        let (status, body) = send(
            app,
            post(
                "/calendar/unblock",
                json!({ "listing_id": 7, "dates": ["2024-06-03"] }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["outcome"], "failed");
        assert!(body["message"].as_str().unwrap().contains("reloaded"));
    }

    #[tokio::test]
    async fn test_empty_selection_is_bad_request() {
        let (app, store) = app(vec![record(7, "", "")]);

        let (status, _) = send(
            app,
            post("/calendar/unblock", json!({ "listing_id": 7, "dates": [] })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_listing_is_not_found() {
        let (app, _) = app(Vec::new());

        let (status, _) = send(
            app,
            post(
                "/calendar/block",
                json!({ "listing_id": 99, "dates": ["2024-06-03"], "actor": "admin" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reload_replaces_board() {
        let (app, store) = app(Vec::new());
        store.set_remote(1, "", "");
        store.set_remote(2, "", "");

        let (status, body) = send(app, post("/calendar/reload", json!({}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["listings"], 2);
        assert_eq!(body["source"], "primary");
    }
}
