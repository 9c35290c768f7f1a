//! Route configuration for show endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{
    create_client, create_show, get_client, get_show, list_clients, list_shows,
    list_upcoming_shows, update_client, update_show,
};
use crate::adapters::http::AppState;

/// Show routes, mounted at `/api/shows`.
pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shows).post(create_show))
        .route("/upcoming", get(list_upcoming_shows))
        .route("/clients", get(list_clients).post(create_client))
        .route("/clients/:id", get(get_client).put(update_client))
        .route("/:id", get(get_show).put(update_show))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::Duration;
    use serde_json::json;

    use crate::adapters::http::test_support::TestApp;
    use crate::domain::foundation::today;

    #[tokio::test]
    async fn show_requires_existing_client() {
        let app = TestApp::new();
        let (status, body) = app
            .post(
                "/api/shows",
                json!({
                    "clientId": uuid::Uuid::new_v4(),
                    "title": "Puppet show",
                    "proposedPrice": 400
                }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errorCode"], "SHOW_CLIENT_NOT_FOUND");
    }

    #[tokio::test]
    async fn upcoming_lists_future_shows_in_date_order() {
        let app = TestApp::new();
        let client_id = app.show_client("Jules Ferry").await;
        let in_days = |days: i64| (today() + Duration::days(days)).to_string();

        for (title, date, status) in [
            ("Later", in_days(30), "pending"),
            ("Past", in_days(-3), "paid"),
            ("Soon", in_days(2), "pending"),
            ("Dropped", in_days(5), "cancelled"),
        ] {
            let (code, _) = app
                .post(
                    "/api/shows",
                    json!({
                        "clientId": client_id,
                        "title": title,
                        "proposedDate": date,
                        "proposedPrice": "350.00",
                        "status": status
                    }),
                )
                .await;
            assert_eq!(code, StatusCode::CREATED);
        }

        let (status, upcoming) = app.get("/api/shows/upcoming").await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = upcoming
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Soon", "Later"]);
    }

    #[tokio::test]
    async fn show_client_payment_skips_settlement() {
        let app = TestApp::new();
        let client_id = app.show_client("Town hall").await;

        let (status, payment) = app
            .post(
                "/api/payments",
                json!({
                    "showClientId": client_id,
                    "amount": 400,
                    "paymentType": "transfer",
                    "paymentDate": "2025-03-01"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(payment["donation"], "0.00");
        assert!(payment["membershipStatus"].is_null());

        let (_, listed) = app
            .get(&format!("/api/payments?showClientId={}", client_id))
            .await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }
}
