// Contract tests for the /schedules HTTP surface
//
// Runs the full application routing (extractor configs, health probes,
// schedule routes) over the in-memory store.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{middleware::from_fn, test, App};
use helpers::*;
use payment_scheduler::app;
use payment_scheduler::middleware::propagate_request_id;
use serde_json::Value;

macro_rules! init_app {
    () => {
        test::init_service(
            App::new()
                .wrap(from_fn(propagate_request_id))
                .configure(app::configure(memory_service())),
        )
        .await
    };
}

/// POST /schedules returns 201 with the full record, always Pending
#[actix_web::test]
async fn test_create_schedule_contract() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/schedules")
        .set_json(TestDataFactory::create_schedule_payload(7, "100.00"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["customer_id"], 7);
    assert_eq!(body["account_id"], 3);
    assert_eq!(body["amount"], "100.00");
    assert_eq!(body["status"], "Pending");
    assert!(body["paid_at"].is_null());
    assert!(body["payment_method"].is_null());
    assert!(body["scheduled_at"].is_string());
}

/// Client-supplied status, payment method and dates are ignored on create
#[actix_web::test]
async fn test_create_ignores_server_owned_fields() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/schedules")
        .set_json(TestDataFactory::create_schedule_payload_with_overrides(9))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Pending");
    assert!(body["payment_method"].is_null());
    assert!(body["paid_at"].is_null());
    assert_ne!(body["scheduled_at"], "2020-01-01T10:00:00");
}

#[actix_web::test]
async fn test_create_rejects_negative_amount() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/schedules")
        .set_json(TestDataFactory::create_schedule_payload(7, "-5.00"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
}

/// Values the schedule table cannot hold are rejected up front
#[actix_web::test]
async fn test_values_beyond_column_limits_are_rejected() {
    let app = init_app!();

    for amount in ["0.000001", "1000000000000000"] {
        let req = test::TestRequest::post()
            .uri("/schedules")
            .set_json(TestDataFactory::create_schedule_payload(7, amount))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "amount {}", amount);
    }

    let req = test::TestRequest::post()
        .uri("/schedules")
        .set_json(TestDataFactory::create_schedule_payload(7, "12.5"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let created: Value = test::read_body_json(resp).await;

    let long_method = "x".repeat(200);
    let req = test::TestRequest::put()
        .uri("/schedules/1/pay")
        .set_json(TestDataFactory::pay_payload(&long_method))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // Nothing was written, and the created body matches a later read
    let req = test::TestRequest::get().uri("/schedules/1").to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);
    assert_eq!(fetched["status"], "Pending");
}

#[actix_web::test]
async fn test_create_rejects_malformed_body() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/schedules")
        .set_json(serde_json::json!({ "amount": "10.00" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_get_missing_schedule_is_404() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/schedules/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 404);
}

#[actix_web::test]
async fn test_list_endpoints() {
    let app = init_app!();

    for customer_id in [1, 2, 1] {
        let req = test::TestRequest::post()
            .uri("/schedules")
            .set_json(TestDataFactory::create_schedule_payload(customer_id, "10.00"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 201);
    }

    let req = test::TestRequest::put()
        .uri("/schedules/2/pay")
        .set_json(TestDataFactory::pay_payload("pix"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get().uri("/schedules").to_request();
    let all: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.len(), 3);

    let req = test::TestRequest::get()
        .uri("/schedules/by-customer/1")
        .to_request();
    let by_customer: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(by_customer.len(), 2);
    assert!(by_customer.iter().all(|s| s["customer_id"] == 1));

    let req = test::TestRequest::get()
        .uri("/schedules/by-customer/99")
        .to_request();
    let empty: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(empty.is_empty());

    let req = test::TestRequest::get()
        .uri("/schedules/by-status/Paid")
        .to_request();
    let paid: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(paid.len(), 1);
    assert_eq!(paid[0]["id"], 2);

    let req = test::TestRequest::get()
        .uri("/schedules/by-status/pending")
        .to_request();
    let pending: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(pending.len(), 2);
    assert!(pending.iter().all(|s| s["status"] == "Pending"));
}

#[actix_web::test]
async fn test_list_by_invalid_status_is_400() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/schedules/by-status/Overdue")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Invalid schedule status"));
}

/// Second payment is rejected with the stored payment details
#[actix_web::test]
async fn test_pay_twice_contract() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/schedules")
        .set_json(TestDataFactory::create_schedule_payload(7, "100.00"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::put()
        .uri("/schedules/1/pay")
        .set_json(TestDataFactory::pay_payload("pix"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let paid: Value = test::read_body_json(resp).await;
    assert_eq!(paid["status"], "Paid");
    assert_eq!(paid["payment_method"], "pix");
    assert!(paid["paid_at"].is_string());

    let req = test::TestRequest::put()
        .uri("/schedules/1/pay")
        .set_json(TestDataFactory::pay_payload("credit_card"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    let details = &body["error"]["details"];
    assert_eq!(details["id"], 1);
    assert_eq!(details["status"], "Paid");
    assert_eq!(details["amount"], "100.00");
    assert_eq!(details["payment_method"], "pix");
    assert_eq!(details["paid_at"], paid["paid_at"]);

    let req = test::TestRequest::get().uri("/schedules/1").to_request();
    let current: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(current, paid);
}

#[actix_web::test]
async fn test_pay_missing_schedule_is_404() {
    let app = init_app!();

    let req = test::TestRequest::put()
        .uri("/schedules/5/pay")
        .set_json(TestDataFactory::pay_payload("pix"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_reschedule_contract() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/schedules")
        .set_json(TestDataFactory::create_schedule_payload(7, "80.00"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::put()
        .uri("/schedules/1/schedule")
        .set_json(TestDataFactory::reschedule_payload("2026-12-01T09:30:00"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["paid_at"], "2026-12-01T09:30:00");

    let req = test::TestRequest::put()
        .uri("/schedules/1/pay")
        .set_json(TestDataFactory::pay_payload("boleto"))
        .to_request();
    let paid: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put()
        .uri("/schedules/1/schedule")
        .set_json(TestDataFactory::reschedule_payload("2027-01-01T00:00:00"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = test::TestRequest::get().uri("/schedules/1").to_request();
    let current: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(current["paid_at"], paid["paid_at"]);

    let req = test::TestRequest::put()
        .uri("/schedules/77/schedule")
        .set_json(TestDataFactory::reschedule_payload("2027-01-01T00:00:00"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

/// create → pay → delete is refused → record still readable
#[actix_web::test]
async fn test_delete_contract() {
    let app = init_app!();

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/schedules")
            .set_json(TestDataFactory::create_schedule_payload(7, "100.00"))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::put()
        .uri("/schedules/1/pay")
        .set_json(TestDataFactory::pay_payload("credit_card"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::delete().uri("/schedules/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Cannot delete a completed payment");

    let req = test::TestRequest::get().uri("/schedules/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::delete().uri("/schedules/2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::get().uri("/schedules/2").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::delete().uri("/schedules/2").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn test_non_numeric_id_is_400() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/schedules/abc").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_health_and_ready() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/health").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get().uri("/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().contains_key("x-request-id"));
}
