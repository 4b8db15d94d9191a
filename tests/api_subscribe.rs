//! Subscribe Endpoint Tests

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;

use common::{counting_router, post, violation_fields};
use gold_signals::mapper;
use gold_signals::schema::{Plan, Subscriber, SubscriptionStatus};
use gold_signals::store::{Document, DocumentStore};

#[tokio::test]
async fn test_subscribe_persists_active_subscriber() {
    let (router, store) = counting_router();
    let before = Utc::now();

    let (status, body) = post(
        &router,
        "/api/subscribe",
        json!({"email": "a@b.com", "plan": "monthly"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let id = body["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let docs = store.find("subscriber", &Document::new(), None).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id().map(|id| id.to_string()), Some(id));

    let subscriber: Subscriber = mapper::from_document(docs[0].clone()).unwrap();
    assert_eq!(subscriber.email.as_str(), "a@b.com");
    assert_eq!(subscriber.plan, Plan::Monthly);
    assert_eq!(subscriber.status, SubscriptionStatus::Active);

    let started = subscriber.started_at.unwrap();
    assert!(started >= before && started <= Utc::now());
}

#[tokio::test]
async fn test_invalid_email_rejected() {
    let (router, store) = counting_router();

    let (status, body) = post(
        &router,
        "/api/subscribe",
        json!({"email": "not-an-email", "plan": "yearly"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(violation_fields(&body), vec!["email"]);
    assert_eq!(store.inserts(), 0);
}

#[tokio::test]
async fn test_unknown_plan_and_missing_email_reported_together() {
    let (router, store) = counting_router();

    let (status, body) = post(&router, "/api/subscribe", json!({"plan": "weekly"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(violation_fields(&body), vec!["email", "plan"]);
    assert_eq!(store.inserts(), 0);
}

#[tokio::test]
async fn test_status_in_body_ignored() {
    let (router, store) = counting_router();

    let (status, _) = post(
        &router,
        "/api/subscribe",
        json!({"email": "vip@gold.example", "plan": "yearly", "status": "canceled"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let docs = store.find("subscriber", &Document::new(), None).unwrap();
    let subscriber: Subscriber = mapper::from_document(docs[0].clone()).unwrap();
    assert_eq!(subscriber.status, SubscriptionStatus::Active);
}
