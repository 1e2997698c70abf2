//! Application router configuration.

use axum::{
    Router,
    response::IntoResponse,
    routing::{any, post},
};

use crate::{AppState, Error, endpoints, transaction::create_transaction_endpoint};

/// The body of the response from the liveness check on `/`.
pub const ROOT_RESPONSE_TEXT: &str = "Its working";

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, any(get_root))
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' confirms that the server is up.
async fn get_root() -> &'static str {
    ROOT_RESPONSE_TEXT
}

async fn get_404_not_found() -> impl IntoResponse {
    Error::NotFound
}

#[cfg(test)]
mod root_route_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        AppState, build_router, endpoints, error::ErrorMessage, routing::ROOT_RESPONSE_TEXT,
    };

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection).expect("Could not initialize database");

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn root_returns_confirmation_text() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        response.assert_text(ROOT_RESPONSE_TEXT);
    }

    #[tokio::test]
    async fn root_accepts_any_method() {
        let server = get_test_server();

        server.post(endpoints::ROOT).await.assert_status_ok();
        server.put(endpoints::ROOT).await.assert_status_ok();
        server.delete(endpoints::ROOT).await.assert_status_ok();
    }

    #[tokio::test]
    async fn unknown_path_returns_not_found() {
        let server = get_test_server();

        let response = server.get("/api/unknown").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<ErrorMessage>().message, "Not found");
    }

    #[tokio::test]
    async fn transactions_route_only_accepts_post() {
        let server = get_test_server();

        let response = server.get(endpoints::TRANSACTIONS_API).await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }
}
