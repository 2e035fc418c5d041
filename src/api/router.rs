//! HTTP router

use axum::{extract::State, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::numbers::{self, NumberRoute};
use super::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check));

    for route in NumberRoute::ALL {
        router = router.route(
            &route.path(),
            get(move |State(state): State<AppState>| numbers::calculate(state, route)),
        );
    }

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::number::NumberService;
    use crate::domain::DomainError;
    use crate::infrastructure::container::ServiceCollection;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct Overflowing;

    impl NumberService for Overflowing {
        fn n_fibonacci(&self, n: u32) -> Result<u64, DomainError> {
            Err(DomainError::overflow(format!("fibonacci({})", n)))
        }

        fn n_prime(&self, _n: u32) -> Result<u64, DomainError> {
            Ok(2)
        }
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get_request(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    fn app() -> Router {
        let state = AppState::new(crate::create_service_collection().unwrap().build());
        create_router(state)
    }

    #[tokio::test]
    async fn test_every_route_answers_first_term() {
        let app = app();

        for route in NumberRoute::ALL {
            let response = app.clone().oneshot(get_request(&route.path())).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", route.name());
            assert_eq!(
                body_text(response).await,
                "Calculating 1-nth: Fibonacci: 1 // Prime: 2"
            );
        }
    }

    #[tokio::test]
    async fn test_counter_advances_per_route() {
        let app = app();

        for _ in 0..2 {
            let response = app.clone().oneshot(get_request("/memento")).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        let third = app.clone().oneshot(get_request("/memento")).await.unwrap();
        assert_eq!(
            body_text(third).await,
            "Calculating 3-nth: Fibonacci: 2 // Prime: 5"
        );

        let other = app.clone().oneshot(get_request("/memory")).await.unwrap();
        assert_eq!(
            body_text(other).await,
            "Calculating 1-nth: Fibonacci: 1 // Prime: 2"
        );
    }

    #[tokio::test]
    async fn test_service_errors_become_json() {
        let mut services = ServiceCollection::new();
        services.add_keyed_instance::<dyn NumberService>(
            NumberRoute::Pure.name(),
            Arc::new(Overflowing),
        );
        let app = create_router(AppState::new(services.build()));

        let response = app.clone().oneshot(get_request("/pure")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"]["type"], "arithmetic_error");

        let missing = app.oneshot(get_request("/memory")).await.unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = app();

        let health = app.clone().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(health.status(), StatusCode::OK);

        let live = app.clone().oneshot(get_request("/live")).await.unwrap();
        assert_eq!(live.status(), StatusCode::OK);

        let ready = app.oneshot(get_request("/ready")).await.unwrap();
        assert_eq!(ready.status(), StatusCode::OK);
        assert!(body_text(ready).await.contains("\"healthy\""));
    }

    #[tokio::test]
    async fn test_ready_reports_missing_services() {
        let app = create_router(AppState::new(ServiceCollection::new().build()));

        let ready = app.oneshot(get_request("/ready")).await.unwrap();
        assert_eq!(ready.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
