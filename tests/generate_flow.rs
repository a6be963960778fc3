use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use cinesynth::app::{build_router, AppState};
use cinesynth::export::{decode_credits, decode_titles};
use cinesynth::generator::{CREDITS_PER_TITLE, TITLE_COUNT};
use cinesynth::DatasetGenerator;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tower::util::ServiceExt;

fn app() -> Router {
    build_router(AppState {
        generator: Arc::new(DatasetGenerator::standard().unwrap()),
    })
}

async fn post_generate(app: Router) -> Value {
    let res = app
        .oneshot(
            Request::post("/generate")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).expect("response is JSON")
}

fn csv_of<'a>(payload: &'a Value, table: &str) -> &'a str {
    payload
        .get(table)
        .and_then(|t| t.get("csv"))
        .and_then(|c| c.as_str())
        .expect("table csv present")
}

#[tokio::test]
async fn health_reports_ok() {
    let res = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn index_serves_download_button() {
    let res = app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Generate Data"));
    assert!(html.contains("/generate"));
}

#[tokio::test]
async fn generate_returns_both_tables() {
    let payload = post_generate(app()).await;

    assert_eq!(payload["titles"]["file_name"], "titles.csv");
    assert_eq!(payload["credits"]["file_name"], "credits.csv");
    assert_eq!(payload["titles"]["rows"], TITLE_COUNT);
    assert_eq!(payload["credits"]["rows"], TITLE_COUNT * CREDITS_PER_TITLE);

    let titles = decode_titles(csv_of(&payload, "titles").as_bytes()).unwrap();
    let credits = decode_credits(csv_of(&payload, "credits").as_bytes()).unwrap();
    assert_eq!(titles.len(), TITLE_COUNT);
    assert_eq!(credits.len(), TITLE_COUNT * CREDITS_PER_TITLE);

    let title_ids: HashSet<_> = titles.iter().map(|t| t.id).collect();
    assert!(credits.iter().all(|c| title_ids.contains(&c.title_id)));
}

#[tokio::test]
async fn generate_is_fresh_per_request() {
    let router = app();
    let first = post_generate(router.clone()).await;
    let second = post_generate(router).await;

    let header = |p: &Value| csv_of(p, "titles").lines().next().unwrap().to_string();
    assert_eq!(header(&first), header(&second));

    let ids = |p: &Value| -> HashSet<_> {
        decode_titles(csv_of(p, "titles").as_bytes())
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect()
    };
    assert!(ids(&first).is_disjoint(&ids(&second)));
}

#[tokio::test]
async fn generate_rejects_get() {
    let res = app()
        .oneshot(Request::get("/generate").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}
