use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use homeval_kernel::server::system_router;
use serde_json::Value;
use tower::ServiceExt;

fn app() -> axum::Router {
    let (router, _doc) = system_router::<()>().split_for_parts();
    router
}

#[tokio::test]
async fn health_returns_ok_without_any_state() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store, no-cache, must-revalidate"
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime"].is_u64());
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
